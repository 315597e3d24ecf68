//! End-to-end engine runs against temporary staging roots.

use shakedown_catalog::Catalog;
use shakedown_engine::{Engine, GenerationPlan, RunOptions};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Application template with a dependency-manifest variant for every
/// runtime version the catalog can sample.
fn app_template(dir: &Path, catalog: &Catalog) -> PathBuf {
    let template = dir.join("app");
    write(&template.join("index.php"), "<?php echo 'ok';\n");
    write(&template.join("src/handler.php"), "<?php // handler\n");

    let versions: BTreeSet<&str> = catalog
        .oses
        .iter()
        .flat_map(|os| os.runtimes.iter().map(String::as_str))
        .collect();
    for version in versions {
        write(
            &template.join(format!("composer-{version}.json")),
            &format!("{{\"require\":{{\"php\":\"{version}.*\"}}}}\n"),
        );
    }
    template
}

fn options(root: PathBuf, template: PathBuf) -> RunOptions {
    RunOptions {
        scenarios_root: root,
        app_template: template,
        request_target_count: 50,
    }
}

#[test]
fn single_mode_materializes_one_scenario() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let template = app_template(dir.path(), &catalog);
    let root = dir.path().join("scenarios");
    fs::create_dir_all(&root).unwrap();

    let engine = Engine::new(&catalog, options(root.clone(), template));
    let outputs = engine.run(GenerationPlan::Single { seed: 12345 }).unwrap();

    assert_eq!(outputs.scenarios.len(), 1);
    let scenario = &outputs.scenarios[0];
    assert!(scenario.identifier.starts_with("randomized-12345-"));

    let folder = &scenario.folder;
    assert!(folder.join("www.apache.conf").exists());
    assert!(folder.join("www.php-fpm.conf").exists());
    assert!(folder.join("scenario.env").exists());
    assert!(folder.join("app/index.php").exists());
    assert!(folder.join("app/composer.json").exists());

    let targets = fs::read_to_string(folder.join("vegeta-request-targets.txt")).unwrap();
    assert_eq!(targets.lines().count(), 50);

    let makefile = fs::read_to_string(&outputs.makefile).unwrap();
    assert!(makefile.contains(&scenario.identifier));

    let compose: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&outputs.compose_file).unwrap()).unwrap();
    let services = compose["services"].as_mapping().unwrap();
    assert_eq!(services.len(), 1);
    let service = &compose["services"][scenario.identifier.as_str()];
    assert_eq!(service["image"].as_str().unwrap(), scenario.image);
    assert_eq!(
        service["environment"]["INSTALLATION_METHOD"].as_str().unwrap(),
        scenario.installation_method
    );
}

#[test]
fn image_reference_tracks_the_identifier() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let template = app_template(dir.path(), &catalog);
    let root = dir.path().join("scenarios");
    fs::create_dir_all(&root).unwrap();

    let engine = Engine::new(&catalog, options(root, template));
    let outputs = engine.run(GenerationPlan::Single { seed: 7 }).unwrap();

    let scenario = &outputs.scenarios[0];
    // identifier: randomized-<seed>-<os>-<version>; image tag ends <os>-<version>
    let os_and_version = scenario
        .identifier
        .strip_prefix("randomized-7-")
        .unwrap();
    assert_eq!(
        scenario.image,
        format!(
            "{}:{}-{}",
            catalog.image.repository, catalog.image.tag_prefix, os_and_version
        )
    );
}

#[test]
fn batch_mode_is_reproducible() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let template = app_template(dir.path(), &catalog);

    let mut runs = Vec::new();
    for name in ["first", "second"] {
        let root = dir.path().join(name);
        fs::create_dir_all(&root).unwrap();
        let engine = Engine::new(&catalog, options(root, template.clone()));
        runs.push(
            engine
                .run(GenerationPlan::Batch {
                    master_seed: 42,
                    count: 3,
                })
                .unwrap(),
        );
    }

    let ids = |outputs: &shakedown_engine::RunOutputs| {
        outputs
            .scenarios
            .iter()
            .map(|s| s.identifier.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&runs[0]), ids(&runs[1]));
    assert_eq!(runs[0].scenarios.len(), 3);

    // run manifests are byte-identical across the two roots
    assert_eq!(
        fs::read_to_string(&runs[0].makefile).unwrap(),
        fs::read_to_string(&runs[1].makefile).unwrap()
    );
    assert_eq!(
        fs::read_to_string(&runs[0].compose_file).unwrap(),
        fs::read_to_string(&runs[1].compose_file).unwrap()
    );

    // and so are the rendered per-scenario artifacts
    for (a, b) in runs[0].scenarios.iter().zip(&runs[1].scenarios) {
        for artifact in [
            "www.apache.conf",
            "www.php-fpm.conf",
            "vegeta-request-targets.txt",
            "scenario.env",
        ] {
            assert_eq!(
                fs::read(a.folder.join(artifact)).unwrap(),
                fs::read(b.folder.join(artifact)).unwrap(),
                "{artifact} differs for {}",
                a.identifier
            );
        }
    }
}

#[test]
fn batch_manifests_cover_exactly_the_generated_set() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let template = app_template(dir.path(), &catalog);
    let root = dir.path().join("scenarios");
    fs::create_dir_all(&root).unwrap();

    let engine = Engine::new(&catalog, options(root, template));
    let outputs = engine
        .run(GenerationPlan::Batch {
            master_seed: 1,
            count: 4,
        })
        .unwrap();

    let makefile = fs::read_to_string(&outputs.makefile).unwrap();
    for scenario in &outputs.scenarios {
        assert!(scenario.folder.exists());
        assert_eq!(
            makefile.matches(&format!("{}:\n", scenario.identifier)).count(),
            1
        );
    }

    let compose: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&outputs.compose_file).unwrap()).unwrap();
    let services = compose["services"].as_mapping().unwrap();
    assert_eq!(services.len(), outputs.scenarios.len());
}

#[test]
fn rerun_clears_stale_scenario_content() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let template = app_template(dir.path(), &catalog);
    let root = dir.path().join("scenarios");
    fs::create_dir_all(&root).unwrap();

    let engine = Engine::new(&catalog, options(root, template));
    let outputs = engine.run(GenerationPlan::Single { seed: 99 }).unwrap();
    let folder = outputs.scenarios[0].folder.clone();
    let stale = folder.join("stale-artifact.txt");
    fs::write(&stale, "from an older catalog").unwrap();

    engine.run(GenerationPlan::Single { seed: 99 }).unwrap();
    assert!(!stale.exists());
    assert!(folder.join("www.apache.conf").exists());
}

#[test]
fn missing_app_template_aborts_the_run() {
    let catalog = Catalog::builtin();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("scenarios");
    fs::create_dir_all(&root).unwrap();

    let engine = Engine::new(
        &catalog,
        options(root, dir.path().join("no-such-template")),
    );
    assert!(engine.run(GenerationPlan::Single { seed: 5 }).is_err());
}
