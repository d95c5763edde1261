//! Comparison pipeline execution.

use super::config::MatcherConfig;
use crate::core::classifier::{ClassificationStrategy, ThresholdStrategy, Verdict};
use crate::core::loader::{ImageLoader, NormalizedImage};
use crate::core::reporter::ComparisonReport;
use crate::core::similarity::{SimilarityScore, SimilarityScorer, SsimParams};
use crate::core::source::ImageLocation;
use crate::error::{ImageDecodeError, Result};
use crate::events::{
    null_sender, ComparisonSummary, Event, EventSender, LoadEvent, PipelineEvent, PipelinePhase,
    ScoreEvent,
};
use chrono::Utc;
use std::time::Instant;
use uuid::Uuid;

/// Builder for a [`SignatureMatcher`]
pub struct SignatureMatcherBuilder {
    config: MatcherConfig,
}

impl SignatureMatcherBuilder {
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the match threshold percentage
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the canonical size images are normalized to
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set the SSIM window parameters
    pub fn ssim(mut self, params: SsimParams) -> Self {
        self.config.ssim = params;
        self
    }

    /// Load the two inputs concurrently (default) or one after the other
    pub fn parallel_load(mut self, parallel: bool) -> Self {
        self.config.parallel_load = parallel;
        self
    }

    /// Validate the configuration and build the matcher
    pub fn build(self) -> Result<SignatureMatcher> {
        self.config.validate()?;
        let strategy = ThresholdStrategy::new(self.config.threshold)?;

        Ok(SignatureMatcher {
            loader: ImageLoader::new(self.config.width, self.config.height),
            scorer: SimilarityScorer::new(self.config.ssim),
            strategy: Box::new(strategy),
            config: self.config,
        })
    }
}

impl Default for SignatureMatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares two signature images.
///
/// Holds only read-only configuration, so one matcher can serve any number
/// of comparisons, including from several threads.
pub struct SignatureMatcher {
    config: MatcherConfig,
    loader: ImageLoader,
    scorer: SimilarityScorer,
    strategy: Box<dyn ClassificationStrategy>,
}

impl SignatureMatcher {
    pub fn builder() -> SignatureMatcherBuilder {
        SignatureMatcherBuilder::new()
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    /// Compare two images without progress events
    pub fn compare(&self, a: &ImageLocation, b: &ImageLocation) -> Result<ComparisonReport> {
        self.compare_with_events(a, b, &null_sender())
    }

    /// Compare two images, reporting progress through `events`.
    ///
    /// If either image fails to load nothing is scored. When both fail,
    /// the error for `a` is returned.
    pub fn compare_with_events(
        &self,
        a: &ImageLocation,
        b: &ImageLocation,
        events: &EventSender,
    ) -> Result<ComparisonReport> {
        let id = Uuid::new_v4();
        let start = Instant::now();

        tracing::info!(comparison = %id, a = %a, b = %b, "comparing signatures");
        events.send(Event::Pipeline(PipelineEvent::Started { comparison_id: id }));

        match self.run(id, a, b, start, events) {
            Ok(report) => Ok(report),
            Err(error) => {
                tracing::warn!(comparison = %id, %error, "comparison failed");
                events.send_with(|| {
                    Event::Pipeline(PipelineEvent::Failed {
                        comparison_id: id,
                        message: error.to_string(),
                    })
                });
                Err(error)
            }
        }
    }

    /// Score and classify two images that are already normalized
    pub fn compare_images(&self, a: &NormalizedImage, b: &NormalizedImage) -> Result<Verdict> {
        let score = self.scorer.score(a, b)?;
        Ok(self.strategy.classify(score))
    }

    fn run(
        &self,
        id: Uuid,
        a: &ImageLocation,
        b: &ImageLocation,
        start: Instant,
        events: &EventSender,
    ) -> Result<ComparisonReport> {
        // Stage 1: load both inputs
        phase(events, id, PipelinePhase::Loading);
        let (image_a, image_b) = self.load_pair(id, a, b, events)?;

        // Stage 2: score
        phase(events, id, PipelinePhase::Scoring);
        let raw = self.scorer.mean_ssim(&image_a, &image_b)?;
        let score = SimilarityScore::from_ssim(raw);
        events.send(Event::Score(ScoreEvent::Computed {
            comparison_id: id,
            raw_ssim: raw,
            score: score.value(),
        }));

        // Stage 3: classify
        phase(events, id, PipelinePhase::Classifying);
        let verdict = self.strategy.classify(score);
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            comparison = %id,
            score = score.value(),
            threshold = self.config.threshold,
            is_match = verdict.is_match(),
            duration_ms,
            "comparison finished"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            comparison_id: id,
            summary: ComparisonSummary {
                score: score.value(),
                threshold: self.config.threshold,
                is_match: verdict.is_match(),
                duration_ms,
            },
        }));

        Ok(ComparisonReport {
            id,
            location_a: a.clone(),
            location_b: b.clone(),
            source_dimensions_a: image_a.source_dimensions(),
            source_dimensions_b: image_b.source_dimensions(),
            normalized_dimensions: image_a.dimensions(),
            verdict,
            threshold: self.config.threshold,
            duration_ms,
            compared_at: Utc::now(),
        })
    }

    fn load_pair(
        &self,
        id: Uuid,
        a: &ImageLocation,
        b: &ImageLocation,
        events: &EventSender,
    ) -> Result<(NormalizedImage, NormalizedImage)> {
        if self.config.parallel_load {
            let (first, second) = rayon::join(
                || self.load_one(id, a, events),
                || self.load_one(id, b, events),
            );
            Ok((first?, second?))
        } else {
            // Stops at the first failure without touching `b`
            let first = self.load_one(id, a, events)?;
            Ok((first, self.load_one(id, b, events)?))
        }
    }

    fn load_one(
        &self,
        id: Uuid,
        location: &ImageLocation,
        events: &EventSender,
    ) -> std::result::Result<NormalizedImage, ImageDecodeError> {
        events.send_with(|| {
            Event::Load(LoadEvent::Started {
                comparison_id: id,
                path: location.path().to_path_buf(),
            })
        });

        match self.loader.load(location) {
            Ok(image) => {
                let (source_width, source_height) = image.source_dimensions();
                events.send_with(|| {
                    Event::Load(LoadEvent::Loaded {
                        comparison_id: id,
                        path: location.path().to_path_buf(),
                        source_width,
                        source_height,
                    })
                });
                Ok(image)
            }
            Err(error) => {
                events.send_with(|| {
                    Event::Load(LoadEvent::Failed {
                        comparison_id: id,
                        path: location.path().to_path_buf(),
                        message: error.to_string(),
                    })
                });
                Err(error)
            }
        }
    }
}

fn phase(events: &EventSender, id: Uuid, phase: PipelinePhase) {
    tracing::debug!(comparison = %id, %phase, "phase changed");
    events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
        comparison_id: id,
        phase,
    }));
}
