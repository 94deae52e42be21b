use std::time::Duration;

use anyhow::Result;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;

pub fn initialise_tracing() {
    let default_filter =
        "warn,videoripple=info,renderer=info,ripple=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = build_config(&args)?;
    tracing::info!(
        video = %config.video_source.display(),
        width = config.surface_size.0,
        height = config.surface_size.1,
        fps = ?config.target_fps,
        idle_timeout = ?config.idle_timeout,
        wave = %config.wave,
        "starting ripple surface"
    );
    Renderer::new(config).run()
}

fn build_config(args: &RunArgs) -> Result<RendererConfig> {
    if let Some(fps) = args.fps {
        if !fps.is_finite() || fps < 0.0 {
            anyhow::bail!("--fps must be a non-negative number, got {fps}");
        }
    }
    if let Some(seconds) = args.idle_timeout {
        if !seconds.is_finite() || seconds <= 0.0 {
            anyhow::bail!("--idle-timeout must be a positive number of seconds, got {seconds}");
        }
    }

    Ok(RendererConfig {
        surface_size: args.size,
        video_source: args.video.clone(),
        target_fps: args.fps.filter(|fps| *fps > 0.0),
        idle_timeout: args.idle_timeout.map(Duration::from_secs_f32),
        wave: args.wave,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::WaveMode;
    use std::path::PathBuf;

    fn args() -> RunArgs {
        RunArgs {
            video: PathBuf::from("clip.gif"),
            size: (1280, 720),
            fps: None,
            idle_timeout: None,
            wave: WaveMode::Bounded,
        }
    }

    #[test]
    fn zero_fps_means_uncapped() {
        let mut run_args = args();
        run_args.fps = Some(0.0);
        let config = build_config(&run_args).unwrap();
        assert_eq!(config.target_fps, None);
    }

    #[test]
    fn negative_fps_is_rejected() {
        let mut run_args = args();
        run_args.fps = Some(-30.0);
        assert!(build_config(&run_args).is_err());
    }

    #[test]
    fn idle_timeout_converts_to_a_duration() {
        let mut run_args = args();
        run_args.idle_timeout = Some(1.5);
        let config = build_config(&run_args).unwrap();
        assert_eq!(config.idle_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn non_positive_idle_timeout_is_rejected() {
        let mut run_args = args();
        run_args.idle_timeout = Some(0.0);
        assert!(build_config(&run_args).is_err());
    }
}
