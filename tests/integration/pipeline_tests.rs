/*!
 * End-to-end tests for locale variant generation
 */

use std::fs;

use locapipe::app_controller::{Controller, PipelineStage};
use locapipe::document::DocumentCodec;
use locapipe::providers::mock::MockProvider;
use locapipe::translation::TranslationService;

use crate::common;
use crate::common::mock_providers::ScriptedProvider;

#[tokio::test]
async fn test_run_withNewDocument_shouldCreateTranslatedVariant() {
    common::init_logger();
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(
        root,
        "portfolio/nova.md",
        "---\ntitle: Nova\ncategory: tech\nyear: '2024'\n---\n\nA short project body.\n",
    )
    .unwrap();

    let service = TranslationService::with_live_provider(Box::new(ScriptedProvider::new()), MockProvider::builtin());
    let controller = Controller::with_translator(common::config_for_locales(root, &["sv"]), service).unwrap();
    let summary = controller.run().await.unwrap();

    let variant = fs::read_to_string(root.join("portfolio/nova.sv.md")).unwrap();
    let (frontmatter, body) = DocumentCodec::try_parse(&variant).unwrap();
    assert_eq!(frontmatter["title"], "[sv] Nova");
    assert_eq!(frontmatter["category"], "tech");
    assert_eq!(frontmatter["year"], "2024");
    assert_eq!(body, "[sv] A short project body.\n");

    let portfolio = summary.stage(PipelineStage::DiscoverPortfolio).unwrap();
    assert_eq!(portfolio.created, 1);
    assert_eq!(portfolio.failed, 0);
    assert!(!root.join("portfolio/nova.de.md").exists());
}

#[tokio::test]
async fn test_run_withSingleCharacterTitle_shouldCopyItWithoutProviderCall() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "portfolio/x.md", "---\ntitle: X\n---\n\nA short project body.\n").unwrap();

    let provider = ScriptedProvider::new();
    let tracker = provider.tracker();
    let service = TranslationService::with_live_provider(Box::new(provider), MockProvider::builtin());
    let controller = Controller::with_translator(common::config_for_locales(root, &["sv"]), service).unwrap();
    controller.run().await.unwrap();

    let variant = fs::read_to_string(root.join("portfolio/x.sv.md")).unwrap();
    let (frontmatter, body) = DocumentCodec::try_parse(&variant).unwrap();
    assert_eq!(frontmatter["title"], "X");
    assert_eq!(body, "[sv] A short project body.\n");

    // only the body reached the provider
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 1);
    assert!(tracker.requests.iter().all(|text| text.trim() != "X"));
}

#[tokio::test]
async fn test_run_withExistingVariant_shouldLeaveItUntouched() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "blog/post.md", common::PROJECT_DOC).unwrap();
    let existing = "---\ntitle: Handskriven\n---\n\nRedigerad för hand.\n";
    common::create_test_file(root, "blog/post.sv.md", existing).unwrap();

    let controller = common::offline_controller(common::config_for_locales(root, &["sv", "de"])).unwrap();
    let summary = controller.run().await.unwrap();

    assert_eq!(fs::read_to_string(root.join("blog/post.sv.md")).unwrap(), existing);
    assert!(root.join("blog/post.de.md").is_file());
    let blog = summary.stage(PipelineStage::DiscoverBlog).unwrap();
    assert_eq!(blog.skipped, 1);
    assert_eq!(blog.created, 1);
}

#[tokio::test]
async fn test_run_twice_shouldWriteNothingTheSecondTime() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "portfolio/one.md", common::PROJECT_DOC).unwrap();
    common::create_test_file(root, "blog/two.mdx", "---\ntitle: Blog\n---\n\nBody\n").unwrap();

    let first = common::offline_controller(common::config_for(root)).unwrap().run().await.unwrap();
    assert_eq!(first.created(), 6);

    let portfolio_before = common::file_names(&root.join("portfolio")).unwrap();
    let snapshot = fs::read_to_string(root.join("portfolio/one.fr.md")).unwrap();

    let second = common::offline_controller(common::config_for(root)).unwrap().run().await.unwrap();

    assert_eq!(second.created(), 0);
    assert_eq!(second.skipped(), 6);
    assert_eq!(second.failed(), 0);
    assert_eq!(common::file_names(&root.join("portfolio")).unwrap(), portfolio_before);
    assert_eq!(fs::read_to_string(root.join("portfolio/one.fr.md")).unwrap(), snapshot);
    // generated variants are not picked up as new sources
    assert!(!root.join("portfolio/one.sv.sv.md").exists());
}

#[tokio::test]
async fn test_run_withOfflineMemory_shouldTranslateKnownPhrasesOnly() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(
        root,
        "portfolio/about.md",
        "---\ntitle: About Me\nsubtitle: Quantum Flux Capacitor\n---\n\nBody\n",
    )
    .unwrap();

    let controller = common::offline_controller(common::config_for_locales(root, &["sv"])).unwrap();
    controller.run().await.unwrap();

    let (frontmatter, _) =
        DocumentCodec::try_parse(&fs::read_to_string(root.join("portfolio/about.sv.md")).unwrap()).unwrap();
    assert_eq!(frontmatter["title"], "Om mig");
    assert_eq!(frontmatter["subtitle"], "Quantum Flux Capacitor");
}

#[tokio::test]
async fn test_run_shouldCopySkippedFieldsVerbatim() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    let source = common::create_test_file(root, "portfolio/project.md", common::PROJECT_DOC).unwrap();

    let service = TranslationService::with_live_provider(Box::new(ScriptedProvider::new()), MockProvider::builtin());
    let controller = Controller::with_translator(common::config_for(root), service).unwrap();
    controller.run().await.unwrap();

    let (source_fm, _) = DocumentCodec::try_parse(&fs::read_to_string(&source).unwrap()).unwrap();
    for code in ["sv", "de", "fr"] {
        let variant = fs::read_to_string(root.join(format!("portfolio/project.{}.md", code))).unwrap();
        let (variant_fm, _) = DocumentCodec::try_parse(&variant).unwrap();
        for key in ["category", "year", "slug", "tags"] {
            assert_eq!(variant_fm[key], source_fm[key], "{} in {}", key, code);
        }
        assert_eq!(variant_fm["title"], format!("[{}] About Me", code));
        let keys: Vec<&String> = variant_fm.keys().collect();
        let source_keys: Vec<&String> = source_fm.keys().collect();
        assert_eq!(keys, source_keys);
    }
}

#[tokio::test]
async fn test_run_withProviderFailureMidDocument_shouldStillWriteVariant() {
    common::init_logger();
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(
        root,
        "portfolio/alpha.md",
        "---\ntitle: First field\ndescription: About Me\nexcerpt: Third field\n---\n\nBody text\n",
    )
    .unwrap();
    common::create_test_file(root, "portfolio/beta.md", "---\ntitle: Next document\n---\n\nMore\n").unwrap();

    // call 2 is the second frontmatter field of the first document
    let provider = ScriptedProvider::failing_on(&[2]);
    let tracker = provider.tracker();
    let service = TranslationService::with_live_provider(Box::new(provider), MockProvider::builtin());
    let controller = Controller::with_translator(common::config_for_locales(root, &["sv"]), service).unwrap();
    let summary = controller.run().await.unwrap();

    let (frontmatter, body) =
        DocumentCodec::try_parse(&fs::read_to_string(root.join("portfolio/alpha.sv.md")).unwrap()).unwrap();
    assert_eq!(frontmatter["title"], "[sv] First field");
    assert_eq!(frontmatter["description"], "Om mig");
    assert_eq!(frontmatter["excerpt"], "[sv] Third field");
    assert_eq!(body, "[sv] Body text\n");

    assert!(root.join("portfolio/beta.sv.md").is_file());
    assert_eq!(summary.failed(), 0);
    assert_eq!(summary.translation.fallbacks, 1);
    // no retries: 4 calls for the first document, 2 for the second
    assert_eq!(tracker.lock().unwrap().call_count, 6);
}

#[tokio::test]
async fn test_run_withMissingRoots_shouldSkipStagesAndContinue() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "blog/only.md", "---\ntitle: Blog\n---\n\nBody\n").unwrap();

    let controller = common::offline_controller(common::config_for_locales(root, &["de"])).unwrap();
    let summary = controller.run().await.unwrap();

    assert!(summary.stage(PipelineStage::DiscoverPortfolio).unwrap().skipped_stage);
    assert!(summary.stage(PipelineStage::GenerateJsonLocales).unwrap().skipped_stage);
    let blog = summary.stage(PipelineStage::DiscoverBlog).unwrap();
    assert!(!blog.skipped_stage);
    assert_eq!(blog.created, 1);
}

#[tokio::test]
async fn test_run_withUnwritableVariant_shouldCountFailureAndContinue() {
    common::init_logger();
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "blog/post.md", "---\ntitle: Blog\n---\n\nBody\n").unwrap();
    // a directory where the Swedish variant should go makes the write fail
    fs::create_dir_all(root.join("blog/post.sv.md")).unwrap();

    let controller = common::offline_controller(common::config_for_locales(root, &["sv", "fr"])).unwrap();
    let summary = controller.run().await.unwrap();

    let blog = summary.stage(PipelineStage::DiscoverBlog).unwrap();
    assert_eq!(blog.failed, 1);
    assert_eq!(blog.created, 1);
    assert!(root.join("blog/post.fr.md").is_file());
}

#[tokio::test]
async fn test_run_withDryRun_shouldWriteNothing() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "portfolio/a.md", common::PROJECT_DOC).unwrap();
    common::create_test_file(root, "data/site.json", r#"{"navigation": {"label": "Home"}}"#).unwrap();

    let controller = common::offline_controller(common::config_for(root)).unwrap().dry_run(true);
    let summary = controller.run().await.unwrap();

    assert_eq!(summary.created(), 0);
    assert_eq!(summary.planned(), 6);
    assert_eq!(common::file_names(&root.join("portfolio")).unwrap(), vec!["a.md"]);
    assert_eq!(common::file_names(&root.join("data")).unwrap(), vec!["site.json"]);
    assert_eq!(summary.translation.total(), 0);
}

#[tokio::test]
async fn test_run_withoutFrontmatter_shouldTranslateBodyOnly() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    common::create_test_file(root, "blog/plain.md", "Just text\n").unwrap();

    let service = TranslationService::with_live_provider(Box::new(ScriptedProvider::new()), MockProvider::builtin());
    let controller = Controller::with_translator(common::config_for_locales(root, &["fr"]), service).unwrap();
    controller.run().await.unwrap();

    let variant = fs::read_to_string(root.join("blog/plain.fr.md")).unwrap();
    assert_eq!(variant, "---\n---\n\n[fr] Just text\n");
}
