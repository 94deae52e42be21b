//! CPU-side video decoding and the GPU texture that streams it.
//!
//! Animated GIFs are decoded to a full frame sequence up front; still
//! images become a single-frame sequence. Playback loops by wrapping the
//! elapsed wall time over the summed frame delays.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::imageops::flip_vertical_in_place;
use image::AnimationDecoder;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// Frame delay assumed when a GIF reports none.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

struct VideoFrame {
    rgba: Vec<u8>,
    duration: Duration,
}

/// A decoded frame sequence, flipped so that v=0 is the bottom row.
pub struct VideoSource {
    width: u32,
    height: u32,
    frames: Vec<VideoFrame>,
}

impl VideoSource {
    /// Decodes the file at `path`; GIFs keep their animation, everything
    /// else becomes a single frame.
    pub fn load(path: &Path) -> Result<Self> {
        let is_gif = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gif"))
            .unwrap_or(false);
        if is_gif {
            Self::load_gif(path)
        } else {
            Self::load_still(path)
        }
    }

    fn load_gif(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open video source {}", path.display()))?;
        let decoder = GifDecoder::new(BufReader::new(file))
            .with_context(|| format!("failed to decode GIF header of {}", path.display()))?;
        let decoded = decoder
            .into_frames()
            .collect_frames()
            .with_context(|| format!("failed to decode GIF frames of {}", path.display()))?;
        if decoded.is_empty() {
            anyhow::bail!("GIF {} contains no frames", path.display());
        }

        let mut frames = Vec::with_capacity(decoded.len());
        let mut width = 0;
        let mut height = 0;
        for frame in decoded {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let duration = if numer == 0 {
                DEFAULT_FRAME_DELAY
            } else {
                Duration::from_secs_f64(f64::from(numer) / f64::from(denom.max(1)) / 1000.0)
            };
            let mut buffer = frame.into_buffer();
            width = buffer.width();
            height = buffer.height();
            flip_vertical_in_place(&mut buffer);
            frames.push(VideoFrame {
                rgba: buffer.into_raw(),
                duration,
            });
        }

        Ok(Self {
            width,
            height,
            frames,
        })
    }

    fn load_still(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to open video source {}", path.display()))?;
        let mut buffer = image.to_rgba8();
        flip_vertical_in_place(&mut buffer);
        Ok(Self {
            width: buffer.width(),
            height: buffer.height(),
            frames: vec![VideoFrame {
                rgba: buffer.into_raw(),
                duration: DEFAULT_FRAME_DELAY,
            }],
        })
    }

    /// Single dark-grey pixel shown when the requested source fails to load.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            frames: vec![VideoFrame {
                rgba: vec![48, 48, 56, 255],
                duration: DEFAULT_FRAME_DELAY,
            }],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// Index of the frame covering `elapsed` on a cumulative-end timeline.
///
/// `timeline[i]` is the time at which frame `i` ends; `elapsed` must
/// already be wrapped to the loop duration.
fn frame_index_at(timeline: &[Duration], elapsed: Duration) -> usize {
    timeline
        .iter()
        .position(|end| elapsed < *end)
        .unwrap_or(timeline.len().saturating_sub(1))
}

/// GPU texture fed by a [`VideoSource`], advanced once per rendered frame.
pub(crate) struct VideoTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    texture: wgpu::Texture,
    extent: wgpu::Extent3d,
    source: VideoSource,
    timeline: Vec<Duration>,
    total: Duration,
    started: Option<Instant>,
    current_frame: usize,
}

impl VideoTexture {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue, source: VideoSource) -> Self {
        let extent = wgpu::Extent3d {
            width: source.width,
            height: source.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("video frames"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            &source.frames[0].rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut total = Duration::ZERO;
        let timeline = source
            .frames
            .iter()
            .map(|frame| {
                total += frame.duration;
                total
            })
            .collect();

        Self {
            view,
            sampler,
            texture,
            extent,
            source,
            timeline,
            total,
            started: None,
            current_frame: 0,
        }
    }

    /// Uploads the frame playback has reached at `now`, if it changed.
    pub(crate) fn update(&mut self, queue: &wgpu::Queue, now: Instant) {
        if !self.source.is_animated() || self.total.is_zero() {
            return;
        }
        let started = *self.started.get_or_insert(now);
        let elapsed_nanos = now.saturating_duration_since(started).as_nanos();
        let wrapped = Duration::from_nanos((elapsed_nanos % self.total.as_nanos()) as u64);
        let index = frame_index_at(&self.timeline, wrapped);
        if index == self.current_frame {
            return;
        }
        self.current_frame = index;
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.source.frames[index].rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.extent.width),
                rows_per_image: Some(self.extent.height),
            },
            self.extent,
        );
    }
}
