use std::path::PathBuf;

use argh::FromArgs;

use glare::imgproc::pipeline::{LogParams, DEFAULT_BRIGHTNESS_THRESHOLD};

mod session;
use session::Session;

#[derive(FromArgs)]
/// Apply the brightness-gated blur and/or the split high-pass enhancement
/// to an image and write the results.
struct Args {
    /// path to an input image (.jpg, .png or .bmp)
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// where to write the blurred result; the filter is skipped when absent
    #[argh(option)]
    low_pass: Option<PathBuf>,

    /// where to write the enhanced result; the filter is skipped when absent
    #[argh(option)]
    high_pass: Option<PathBuf>,

    /// brightness threshold for the low-pass filter (default 200)
    #[argh(option, default = "DEFAULT_BRIGHTNESS_THRESHOLD")]
    threshold: u8,

    /// side length of the Laplacian-of-Gaussian kernel (default 5)
    #[argh(option, default = "5")]
    kernel_size: usize,

    /// sigma of the Laplacian-of-Gaussian kernel (default 1.0)
    #[argh(option, default = "1.0")]
    sigma: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mut session = Session::new();
    session.load(&args.input)?;
    if let Some(image) = session.image() {
        log::info!(
            "loaded {} ({}x{})",
            args.input.display(),
            image.width(),
            image.height()
        );
    }

    if let Some(path) = &args.low_pass {
        session.run_low_pass(args.threshold)?;
        let written = session.save_low_pass(path)?;
        log::info!(
            "wrote low-pass result (threshold {}) to {}",
            args.threshold,
            written.display()
        );
    }

    if let Some(path) = &args.high_pass {
        let params = LogParams {
            kernel_size: args.kernel_size,
            sigma: args.sigma,
        };
        session.run_high_pass(&params)?;
        let written = session.save_high_pass(path)?;
        log::info!(
            "wrote high-pass result ({}x{} kernel, sigma {}) to {}",
            params.kernel_size,
            params.kernel_size,
            params.sigma,
            written.display()
        );
    }

    if args.low_pass.is_none() && args.high_pass.is_none() {
        log::warn!("no output path given; nothing to do");
    }

    Ok(())
}
