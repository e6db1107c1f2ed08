use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::discovery::ContentDiscovery;
use crate::document::{ContentDocument, Frontmatter, TranslatedDocument};
use crate::field_classifier::FieldClassifier;
use crate::file_utils::{FileManager, LocaleVariantResolver};
use crate::json_tree::JsonTreeTranslator;
use crate::locale::{Locale, LocaleSet};
use crate::translation::{ContentKind, TranslationService, TranslationStats};

// @module: Pipeline controller for locale generation

/// Linear pipeline stages; there is no backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    DiscoverPortfolio,
    DiscoverBlog,
    GenerateJsonLocales,
    Report,
    Done,
}

impl PipelineStage {
    /// The stage that follows this one
    pub fn next(self) -> Self {
        match self {
            Self::Init => Self::DiscoverPortfolio,
            Self::DiscoverPortfolio => Self::DiscoverBlog,
            Self::DiscoverBlog => Self::GenerateJsonLocales,
            Self::GenerateJsonLocales => Self::Report,
            Self::Report | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::DiscoverPortfolio => "portfolio",
            Self::DiscoverBlog => "blog",
            Self::GenerateJsonLocales => "data",
            Self::Report => "report",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Counters for one stage, per (item, locale) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: PipelineStage,
    /// Variants written
    pub created: usize,
    /// Variants that already existed
    pub skipped: usize,
    /// Variants that failed and will be retried next run
    pub failed: usize,
    /// Variants a dry run would have written
    pub planned: usize,
    /// The stage's input was missing, so the stage did nothing
    pub skipped_stage: bool,
}

impl StageReport {
    pub fn new(stage: PipelineStage) -> Self {
        Self {
            stage,
            created: 0,
            skipped: 0,
            failed: 0,
            planned: 0,
            skipped_stage: false,
        }
    }

    fn record(&mut self, outcome: VariantOutcome) {
        match outcome {
            VariantOutcome::Created => self.created += 1,
            VariantOutcome::AlreadyExists => self.skipped += 1,
            VariantOutcome::Planned => self.planned += 1,
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
    pub translation: TranslationStats,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn created(&self) -> usize {
        self.stages.iter().map(|s| s.created).sum()
    }

    pub fn skipped(&self) -> usize {
        self.stages.iter().map(|s| s.skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.stages.iter().map(|s| s.failed).sum()
    }

    pub fn planned(&self) -> usize {
        self.stages.iter().map(|s| s.planned).sum()
    }

    pub fn stage(&self, stage: PipelineStage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

/// What happened to one (item, locale) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantOutcome {
    Created,
    AlreadyExists,
    Planned,
}

/// Main application controller for locale generation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Locales to generate
    locales: LocaleSet,

    // @field: Frontmatter translation policy
    classifier: FieldClassifier,

    // @field: Data file translator
    json_translator: JsonTreeTranslator,

    // @field: Live provider with offline fallback
    translator: TranslationService,

    // @field: Plan only, never translate or write
    dry_run: bool,

    // @field: Draw a progress spinner
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = TranslationService::new(&config.translation)?;
        Self::with_translator(config, translator)
    }

    // @method: Create a controller around an existing translation service
    pub fn with_translator(config: Config, translator: TranslationService) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let locales = config.content.locales()?;
        let classifier = FieldClassifier::new(config.content.skip_set());
        let json_translator = JsonTreeTranslator::new(config.content.json_policy(), classifier.clone());

        Ok(Self {
            config,
            locales,
            classifier,
            json_translator,
            translator,
            dry_run: false,
            show_progress: false,
        })
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run every stage in order and return the summary
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut stages = Vec::new();
        let mut stage = PipelineStage::Init;

        while stage != PipelineStage::Done {
            match stage {
                PipelineStage::Init => {
                    info!(
                        "Generating locales [{}] under {:?}{}",
                        self.locales.iter().map(|l| l.code()).collect::<Vec<_>>().join(", "),
                        self.config.content.root,
                        if self.dry_run { " (dry run)" } else { "" }
                    );
                }
                PipelineStage::DiscoverPortfolio => {
                    let root = self.config.content.portfolio_path();
                    stages.push(self.run_document_stage(stage, &root).await);
                }
                PipelineStage::DiscoverBlog => {
                    let root = self.config.content.blog_path();
                    stages.push(self.run_document_stage(stage, &root).await);
                }
                PipelineStage::GenerateJsonLocales => {
                    let data_path = self.config.content.data_path();
                    stages.push(self.run_json_stage(&data_path).await);
                }
                PipelineStage::Report => {
                    let summary = RunSummary {
                        stages: stages.clone(),
                        translation: self.translator.stats(),
                        elapsed: start_time.elapsed(),
                    };
                    Self::log_summary(&summary);
                }
                PipelineStage::Done => {}
            }
            stage = stage.next();
        }

        Ok(RunSummary {
            stages,
            translation: self.translator.stats(),
            elapsed: start_time.elapsed(),
        })
    }

    /// Generate missing variants for every document under `root`
    async fn run_document_stage(&self, stage: PipelineStage, root: &Path) -> StageReport {
        let mut report = StageReport::new(stage);

        if !FileManager::dir_exists(root) {
            warn!("Skipping {} stage, content directory not found: {:?}", stage, root);
            report.skipped_stage = true;
            return report;
        }

        let progress = self.progress_bar(stage);
        for path in ContentDiscovery::with_extensions(root, &self.config.content.extensions) {
            progress.set_message(path.display().to_string());
            self.process_document(&path, &mut report).await;
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "{} stage: {} created, {} already existed, {} failed",
            stage, report.created, report.skipped, report.failed
        );
        report
    }

    /// Generate every missing locale variant of one document.
    /// Errors are logged and counted; they never stop the stage.
    async fn process_document(&self, path: &Path, report: &mut StageReport) {
        let missing: Vec<Locale> = self
            .locales
            .iter()
            .filter(|locale| {
                let exists = LocaleVariantResolver::variant_exists(path, *locale);
                if exists {
                    info!(
                        "Skipping {:?} ({}): already exists",
                        LocaleVariantResolver::variant_path(path, *locale),
                        locale
                    );
                    report.record(VariantOutcome::AlreadyExists);
                }
                !exists
            })
            .collect();

        if missing.is_empty() {
            return;
        }

        if self.dry_run {
            for locale in missing {
                info!("Would create {:?}", LocaleVariantResolver::variant_path(path, locale));
                report.record(VariantOutcome::Planned);
            }
            return;
        }

        let document = match ContentDocument::read(path) {
            Ok(document) => document,
            Err(e) => {
                error!("Failed to read {:?}: {:#}", path, e);
                report.failed += missing.len();
                return;
            }
        };

        for locale in missing {
            match self.generate_document_variant(&document, locale).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    error!("Failed to generate {} variant of {:?}: {:#}", locale, path, e);
                    report.failed += 1;
                }
            }
        }
    }

    /// Translate and write one locale variant unless it already exists
    pub async fn generate_document_variant(
        &self,
        document: &ContentDocument,
        locale: Locale,
    ) -> Result<VariantOutcome> {
        let variant_path = LocaleVariantResolver::variant_path(&document.source_path, locale);
        if LocaleVariantResolver::variant_exists(&document.source_path, locale) {
            info!("Skipping {:?} ({}): already exists", variant_path, locale);
            return Ok(VariantOutcome::AlreadyExists);
        }

        let translated = self.translate_document(document, locale).await;
        let rendered = translated.render()?;
        FileManager::write_to_file(&variant_path, &rendered)?;

        info!("Created {:?}", variant_path);
        Ok(VariantOutcome::Created)
    }

    /// Translate eligible frontmatter fields one at a time, then the body
    pub async fn translate_document(&self, document: &ContentDocument, locale: Locale) -> TranslatedDocument {
        let mut frontmatter = Frontmatter::with_capacity(document.frontmatter.len());
        for (key, value) in &document.frontmatter {
            let translated = match value {
                Value::String(text) if self.classifier.should_translate(key, value) => {
                    debug!("Translating field '{}' of {:?} to {}", key, document.source_path, locale);
                    Value::String(self.translator.translate(text, locale, ContentKind::Frontmatter).await)
                }
                _ => value.clone(),
            };
            frontmatter.insert(key.clone(), translated);
        }

        let body = if document.body.trim().is_empty() {
            document.body.clone()
        } else {
            self.translator.translate(&document.body, locale, ContentKind::Body).await
        };

        TranslatedDocument {
            target_locale: locale,
            frontmatter,
            body,
        }
    }

    /// Generate missing locale copies of the navigation/metadata data file
    async fn run_json_stage(&self, data_path: &Path) -> StageReport {
        let mut report = StageReport::new(PipelineStage::GenerateJsonLocales);

        if !FileManager::file_exists(data_path) {
            warn!("Skipping data stage, data file not found: {:?}", data_path);
            report.skipped_stage = true;
            return report;
        }

        let data = match Self::read_json(data_path) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to load {:?}: {:#}", data_path, e);
                report.failed += self.locales.len();
                return report;
            }
        };

        for locale in self.locales.iter() {
            match self.generate_json_variant(data_path, &data, locale).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    error!("Failed to generate {} variant of {:?}: {:#}", locale, data_path, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "data stage: {} created, {} already existed, {} failed",
            report.created, report.skipped, report.failed
        );
        report
    }

    /// Translate and write one locale copy of a data file unless it already exists
    pub async fn generate_json_variant(
        &self,
        data_path: &Path,
        data: &Value,
        locale: Locale,
    ) -> Result<VariantOutcome> {
        let variant_path: PathBuf = LocaleVariantResolver::variant_path(data_path, locale);
        if LocaleVariantResolver::variant_exists(data_path, locale) {
            info!("Skipping {:?} ({}): already exists", variant_path, locale);
            return Ok(VariantOutcome::AlreadyExists);
        }
        if self.dry_run {
            info!("Would create {:?}", variant_path);
            return Ok(VariantOutcome::Planned);
        }

        let translated = self.json_translator.translate_tree(data, locale, &self.translator).await;
        let mut json = serde_json::to_string_pretty(&translated)
            .with_context(|| format!("Failed to serialize {} data file", locale))?;
        json.push('\n');
        FileManager::write_to_file(&variant_path, &json)?;

        info!("Created {:?}", variant_path);
        Ok(VariantOutcome::Created)
    }

    fn read_json(path: &Path) -> Result<Value> {
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))
    }

    fn progress_bar(&self, stage: PipelineStage) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{prefix}] {pos} documents {wide_msg}") {
            progress.set_style(style);
        }
        progress.set_prefix(stage.to_string());
        progress.enable_steady_tick(Duration::from_millis(120));
        progress
    }

    fn log_summary(summary: &RunSummary) {
        for stage in &summary.stages {
            if stage.skipped_stage {
                info!("  {:<10} skipped (input missing)", stage.stage.to_string());
            } else {
                info!(
                    "  {:<10} created {:>3} | existing {:>3} | failed {:>3} | planned {:>3}",
                    stage.stage.to_string(),
                    stage.created,
                    stage.skipped,
                    stage.failed,
                    stage.planned
                );
            }
        }
        let stats = &summary.translation;
        info!(
            "Translations: {} live, {} fallback, {} offline, {} unchanged",
            stats.live, stats.fallbacks, stats.offline, stats.skipped
        );
        info!(
            "Done in {}: {} created, {} already existed, {} failed",
            Self::format_duration(summary.elapsed),
            summary.created(),
            summary.skipped(),
            summary.failed()
        );
    }

    /// Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
