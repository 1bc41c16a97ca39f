//! End-to-end tests across the resolution pipeline
//!
//! Each test drives a locator through resolution, then exercises the
//! document layer on the result: defaults, merge, validation and saving.

use cfg_core::loader::{self, resolve_with_defaults, save_with_validation};
use cfg_core::{
    HttpFetcher, Mapping, ReqwestFetcher, ResolveRequest, SourceResolver, SourceSettings, Value,
};
use cfg_git::{CommandRunner, RepoCloner};
use cfg_test_utils::repo::ConfigRepo;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn yaml_map(text: &str) -> Mapping {
    serde_yaml::from_str(text).unwrap()
}

fn yaml_value(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

/// Writes a single `init.yaml` wherever git would have cloned to.
struct SingleFileRunner(&'static str);

impl CommandRunner for SingleFileRunner {
    fn run(
        &self,
        command: &[String],
        _working_dir: Option<&Path>,
        _env: Option<&HashMap<String, String>>,
    ) -> cfg_git::Result<String> {
        let destination = PathBuf::from(command.last().unwrap());
        fs::create_dir_all(&destination).unwrap();
        fs::write(destination.join("init.yaml"), self.0).unwrap();
        Ok(String::new())
    }
}

fn resolver_with<F: HttpFetcher>(
    runner: SingleFileRunner,
    fetcher: F,
) -> SourceResolver<SingleFileRunner, F> {
    SourceResolver::with_parts(
        RepoCloner::with_runner(runner),
        fetcher,
        SourceSettings::default(),
    )
}

#[test]
fn test_local_resolve_merge_save_reload() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("init.yaml");
    fs::write(
        &source,
        "server:\n  host: localhost\n  port: 8080\nfeatures: [a, b]\n",
    )
    .unwrap();

    let resolver = SourceResolver::new(SourceSettings::default()).unwrap();
    let base = resolver
        .resolve(&ResolveRequest::new(source.display().to_string()))
        .unwrap();

    let merged = base.merge(&yaml_map("server:\n  port: 9090\nfeatures: [c]\n"));
    assert_eq!(base.get("server.port"), Some(&Value::from(8080)));
    assert_eq!(merged.get("server.host"), Some(&Value::from("localhost")));
    assert_eq!(merged.get("server.port"), Some(&Value::from(9090)));
    assert_eq!(merged.get("features"), Some(&yaml_value("[c]")));

    let copy = temp.path().join("out/merged.yaml");
    assert!(merged.save(Some(copy.as_path())));
    let reloaded = loader::load(&copy).unwrap();
    assert_eq!(reloaded.data(), merged.data());

    // Saving without a path goes back to the origin file.
    let mut edited = reloaded.clone();
    edited.set("server.tls.enabled", true);
    assert!(edited.save(None));
    assert_eq!(
        loader::load(&copy).unwrap().get("server.tls.enabled"),
        Some(&Value::Bool(true))
    );
}

#[test]
fn test_clone_defaults_validate_and_save() {
    let repo = ConfigRepo::with_files(&[(
        "services/api.yaml",
        "name: api\nreplicas: 2\nowner: ~\n",
    )]);
    let defaults = yaml_map("replicas: 1\nimage.tag: latest\n");
    let resolver = SourceResolver::new(SourceSettings::default().with_clone_args(["--quiet"])).unwrap();
    let clones = TempDir::new().unwrap();

    let request = ResolveRequest::new(repo.reference())
        .with_target_file("services/api.yaml")
        .with_workspace_root(clones.path());
    let document = resolve_with_defaults(&resolver, &request, &defaults).unwrap();

    assert_eq!(document.get("replicas"), Some(&Value::from(2)));
    assert_eq!(document.get("image.tag"), Some(&Value::from("latest")));
    assert!(document.has_required_keys(&["name", "owner"]));
    assert!(!document.validate_structure(&["name", "owner"]));
    assert_eq!(fs::read_dir(clones.path()).unwrap().count(), 0);

    let out = TempDir::new().unwrap();
    let target = out.path().join("api.yaml");
    assert!(save_with_validation(
        document.into_mapping(),
        &target,
        &["name", "region"]
    ));
    let saved = loader::load_with_defaults(&target, &yaml_map("region: eu-west-1\n")).unwrap();
    assert_eq!(saved.get("region"), Some(&Value::from("eu-west-1")));
    assert_eq!(saved.get("name"), Some(&Value::from("api")));
}

#[test]
fn test_http_document_is_not_saved_back_to_url() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/env/prod.yaml")
        .with_status(200)
        .with_body("region: us-east-1\n")
        .create();

    let resolver = resolver_with(
        SingleFileRunner("unused: true\n"),
        ReqwestFetcher::new(None).unwrap(),
    );
    let url = format!("{}/env/prod.yaml", server.url());
    let document = resolver.resolve(&ResolveRequest::new(url.as_str())).unwrap();

    assert_eq!(document.origin(), Some(url.as_str()));
    assert!(!document.save(None));

    let temp = TempDir::new().unwrap();
    assert!(document.save(Some(temp.path().join("prod.yaml").as_path())));
}

#[test]
fn test_http_failure_on_git_url_falls_back_to_clone() {
    let mut server = mockito::Server::new();
    let fetch = server
        .mock("GET", "/acme/widgets.git")
        .with_status(404)
        .expect(1)
        .create();

    let resolver = resolver_with(
        SingleFileRunner("source: clone\n"),
        ReqwestFetcher::new(None).unwrap(),
    );
    let clones = TempDir::new().unwrap();
    let locator = format!("{}/acme/widgets.git", server.url());
    let request = ResolveRequest::new(locator.as_str()).with_workspace_root(clones.path());

    let document = resolver.resolve(&request).unwrap();

    fetch.assert();
    assert_eq!(document.get("source"), Some(&Value::from("clone")));
    assert_eq!(document.origin(), Some(locator.as_str()));
    assert_eq!(fs::read_dir(clones.path()).unwrap().count(), 0);
}

#[test]
fn test_settings_from_environment_lookup_drive_clone() {
    let repo = ConfigRepo::with_files(&[("init.yaml", "from: env-settings\n")]);
    let settings = SourceSettings::from_lookup(|name| match name {
        "CFGSRC_GIT" => Some("git".to_string()),
        "CFGSRC_HTTP_TIMEOUT_SECS" => Some("10".to_string()),
        _ => None,
    })
    .unwrap();

    let resolver = SourceResolver::new(settings).unwrap();
    let document = resolver.resolve(&ResolveRequest::new(repo.reference())).unwrap();
    assert_eq!(document.get("from"), Some(&Value::from("env-settings")));
}

#[test]
fn test_missing_git_program_is_absent_with_error_recorded() {
    let repo = ConfigRepo::with_files(&[("init.yaml", "a: 1\n")]);
    let resolver = SourceResolver::new(
        SourceSettings::default().with_git_program("/nonexistent/bin/git"),
    )
    .unwrap();

    assert!(resolver.resolve(&ResolveRequest::new(repo.reference())).is_none());
    assert!(resolver.cloner().last_error().is_some());
}
