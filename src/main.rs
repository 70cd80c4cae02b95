use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use voxelkit::{
    ColorSpace, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA, Filter, FilterError, PixelBuffer, Projection,
    ProjectionFilter, Slice, SliceType, VolumeLoader,
};
use web_time::Instant;

const VOLUME_HEADER: &str = "volume,gaussian_3d,median_3d,mip,minip,aip,xz_slice,yz_slice,slab";

const IMAGE_HEADER: &str = "image,adjust_brightness,auto_adjust_brightness,salt_and_pepper,\
median_blur,gaussian_blur,box_blur,grayscale,histogram_gray,threshold_gray,histogram_hsv,\
threshold_hsv,histogram_hsl,threshold_hsl,sobel,prewitt,roberts,scharr";

const KERNEL_HEADER: &str = "image,kernel_size,gaussian_blur,box_blur,median_blur";

/// Time voxelkit filters and append the results to CSV files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 3D blurs, projections, slices and slab loading on one scan folder (ms)
    Volume {
        /// Folder holding one image per slice
        #[arg(default_value = "scans")]
        directory: PathBuf,

        #[arg(long, default_value = "results.csv")]
        csv: PathBuf,
    },
    /// Every 2D filter on each image (microseconds)
    Image {
        /// Images to time, one CSV row each
        #[arg(required = true)]
        images: Vec<PathBuf>,

        #[arg(long, default_value = "filter_performance.csv")]
        csv: PathBuf,
    },
    /// Gaussian, box and median 2D blur over a range of odd kernel sizes (ms)
    Kernels {
        image: PathBuf,

        #[arg(long, default_value_t = 3)]
        min_kernel: usize,

        #[arg(long, default_value_t = 15)]
        max_kernel: usize,

        #[arg(long, default_value = "kernel_performance_2d.csv")]
        csv: PathBuf,
    },
}

/// One CSV row of timings, filled as the operations run.
struct Timings {
    cells: Vec<String>,
    unit: fn(Duration) -> u128,
}

impl Timings {
    fn millis(label: impl Into<String>) -> Self {
        Self {
            cells: vec![label.into()],
            unit: |elapsed| elapsed.as_millis(),
        }
    }

    fn micros(label: impl Into<String>) -> Self {
        Self {
            cells: vec![label.into()],
            unit: |elapsed| elapsed.as_micros(),
        }
    }

    /// Run `op`, log and record its wall time, and pass its result through.
    fn record<T, E>(&mut self, name: &str, op: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let start = Instant::now();
        let result = op();
        let elapsed = start.elapsed();
        info!("{name}: {elapsed:?}");
        self.cells.push((self.unit)(elapsed).to_string());
        result
    }

    fn row(&self) -> String {
        self.cells.join(",")
    }
}

fn append_row(csv: &Path, header: &str, row: &str) -> anyhow::Result<()> {
    let fresh = !csv.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv)
        .with_context(|| format!("opening {}", csv.display()))?;
    if fresh {
        writeln!(file, "{header}")?;
    }
    writeln!(file, "{row}")?;
    Ok(())
}

fn open(path: &Path) -> anyhow::Result<PixelBuffer> {
    PixelBuffer::open(path).with_context(|| format!("loading {}", path.display()))
}

fn to_gray(img: &mut PixelBuffer) -> Result<(), FilterError> {
    if img.channels() == 1 {
        return Ok(());
    }
    Filter::rgb_to_gray(img)
}

fn bench_volume(directory: &Path, csv: &Path) -> anyhow::Result<()> {
    let volume = VolumeLoader::load_from_directory(directory, None)
        .with_context(|| format!("loading volume from {}", directory.display()))?;
    let (depth, height, width) = volume.dim();
    info!("Benchmarking {depth} slices of {width} x {height}");
    let mut timings = Timings::millis(directory.display().to_string());

    let mut blurred = volume.clone();
    timings.record("Gaussian blur 3D", || {
        Filter::gaussian_blur_3d(&mut blurred, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA)
    })?;
    let mut blurred = volume.clone();
    timings.record("Median blur 3D", || {
        Filter::median_blur_3d(&mut blurred, DEFAULT_KERNEL_SIZE)
    })?;

    let mut scratch = volume.clone();
    timings.record("MIP", || Projection::mip(&mut scratch, ProjectionFilter::None))?;
    timings.record("MinIP", || {
        Projection::min_ip(&mut scratch, ProjectionFilter::None)
    })?;
    timings.record("AIP", || Projection::aip(&mut scratch, ProjectionFilter::None))?;

    timings.record("XZ slice", || Slice::slice(&volume, height / 2, SliceType::XZ))?;
    timings.record("YZ slice", || Slice::slice(&volume, width / 2, SliceType::YZ))?;

    let slab_end = depth.min(10);
    timings.record("Slab load", || {
        VolumeLoader::load_slab(directory, 1, slab_end, None)
    })?;

    append_row(csv, VOLUME_HEADER, &timings.row())?;
    info!("Results appended to {}", csv.display());
    Ok(())
}

fn bench_image(path: &Path, csv: &Path) -> anyhow::Result<()> {
    let mut timings = Timings::micros(path.display().to_string());

    // Tone, blur and gray filters chain on one image.
    let mut img = open(path)?;
    timings.record("Adjust brightness", || {
        Filter::adjust_brightness(&mut img, 50);
        Ok::<_, FilterError>(())
    })?;
    timings.record("Auto adjust brightness", || {
        Filter::auto_adjust_brightness(&mut img);
        Ok::<_, FilterError>(())
    })?;
    timings.record("Salt and pepper", || Filter::add_salt_and_pepper(&mut img, 0.05))?;
    timings.record("Median blur", || Filter::median_blur(&mut img, 3))?;
    timings.record("Gaussian blur", || {
        Filter::gaussian_blur_2d(&mut img, 3, DEFAULT_SIGMA)
    })?;
    timings.record("Box blur", || Filter::box_blur(&mut img, 3))?;
    timings.record("Grayscale", || to_gray(&mut img))?;
    timings.record("Histogram gray", || {
        Filter::histogram_equalization(&mut img, ColorSpace::Hsv)
    })?;
    timings.record("Threshold gray", || {
        Filter::threshold(&mut img, 128, ColorSpace::Hsv)
    })?;

    // Colour-space variants start from a fresh copy each.
    for space in [ColorSpace::Hsv, ColorSpace::Hsl] {
        let mut img = open(path)?;
        timings.record(&format!("Histogram {space:?}"), || {
            Filter::histogram_equalization(&mut img, space)
        })?;
        timings.record(&format!("Threshold {space:?}"), || {
            Filter::threshold(&mut img, 128, space)
        })?;
    }

    let edges: [(&str, fn(&mut PixelBuffer) -> Result<(), FilterError>); 4] = [
        ("Sobel", Filter::apply_sobel_edge_detection),
        ("Prewitt", Filter::apply_prewitt_edge_detection),
        ("Roberts", Filter::apply_roberts_edge_detection),
        ("Scharr", Filter::apply_scharr_edge_detection),
    ];
    for (name, detect) in edges {
        let mut img = open(path)?;
        to_gray(&mut img)?;
        timings.record(name, || detect(&mut img))?;
    }

    append_row(csv, IMAGE_HEADER, &timings.row())?;
    info!("Performance testing for {} completed", path.display());
    Ok(())
}

fn bench_kernels(
    path: &Path,
    min_kernel: usize,
    max_kernel: usize,
    csv: &Path,
) -> anyhow::Result<()> {
    // smallest odd size not below the requested minimum
    let first = min_kernel.max(1) | 1;
    for kernel_size in (first..=max_kernel).step_by(2) {
        info!("Kernel size {kernel_size}");
        let mut timings = Timings::millis(path.display().to_string());
        timings.cells.push(kernel_size.to_string());

        let mut img = open(path)?;
        timings.record("Gaussian blur", || {
            Filter::gaussian_blur_2d(&mut img, kernel_size, DEFAULT_SIGMA)
        })?;
        let mut img = open(path)?;
        timings.record("Box blur", || Filter::box_blur(&mut img, kernel_size))?;
        let mut img = open(path)?;
        timings.record("Median blur", || Filter::median_blur(&mut img, kernel_size))?;

        append_row(csv, KERNEL_HEADER, &timings.row())?;
    }
    info!("Results appended to {}", csv.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Volume { directory, csv } => bench_volume(&directory, &csv),
        Command::Image { images, csv } => {
            for image in &images {
                bench_image(image, &csv)?;
            }
            info!("Results appended to {}", csv.display());
            Ok(())
        }
        Command::Kernels {
            image,
            min_kernel,
            max_kernel,
            csv,
        } => bench_kernels(&image, min_kernel, max_kernel, &csv),
    }
}
