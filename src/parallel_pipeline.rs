// THEORY:
// The `parallel_pipeline` runs the single-frame detector over a batch of frames
// concurrently. Detection is CPU-bound and frames are independent, so each frame is
// handed to tokio's blocking pool while a semaphore caps how many run at once.
//
// Ordering: results are tagged with the frame's index on submission and sorted
// by it before returning, so the output lines up with the input no matter which
// worker finishes first. A frame that fails (bad image, lost worker) yields an
// `Err` in its own slot and never affects its neighbours.

use crate::config::DetectorConfig;
use crate::error::{VisionError, VisionResult};
use crate::pipeline::{DetectionPipeline, FrameAnalysis};
use futures::future::join_all;
use image::DynamicImage;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

pub struct ParallelPipeline {
    pipeline: Arc<DetectionPipeline>,
    workers: usize,
}

impl ParallelPipeline {
    /// One worker per logical CPU.
    pub fn new(config: DetectorConfig) -> VisionResult<Self> {
        Ok(Self {
            pipeline: Arc::new(DetectionPipeline::new(config)?),
            workers: num_cpus::get().max(1),
        })
    }

    /// Caps the number of frames analyzed at the same time (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn config(&self) -> &DetectorConfig {
        self.pipeline.config()
    }

    /// Analyzes every frame and returns one result per frame, in submission order.
    pub async fn process_frames(&self, frames: Vec<Arc<DynamicImage>>) -> Vec<VisionResult<FrameAnalysis>> {
        let frame_count = frames.len();
        let permits = Arc::new(Semaphore::new(self.workers));

        let tasks = frames.into_iter().enumerate().map(|(frame_id, frame)| {
            let pipeline = Arc::clone(&self.pipeline);
            let permits = Arc::clone(&permits);
            async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (
                            frame_id,
                            Err(VisionError::Worker {
                                reason: e.to_string(),
                            }),
                        );
                    }
                };
                let joined = tokio::task::spawn_blocking(move || pipeline.analyze(&*frame)).await;
                let result = joined.unwrap_or_else(|e| {
                    warn!(frame_id, error = %e, "frame worker did not finish");
                    Err(VisionError::Worker {
                        reason: e.to_string(),
                    })
                });
                (frame_id, result)
            }
        });

        let mut results = join_all(tasks).await;
        results.sort_by_key(|(frame_id, _)| *frame_id);

        debug!(frames = frame_count, workers = self.workers, "batch analyzed");
        results.into_iter().map(|(_, result)| result).collect()
    }
}
