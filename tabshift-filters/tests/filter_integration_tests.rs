//! Integration tests for tabshift-filters.
//!
//! These tests exercise the full parse → predicate → match pipeline with
//! realistic filter lists, documents and focus contexts.

use std::collections::HashMap;
use std::path::PathBuf;
use tabshift_config::{ContentKind, DocumentInfo, TabDescriptor};
use tabshift_filters::{
    BlockingPredicate, FilterEnv, FilterToken, Keyword, NoDocuments, PatternKind,
    VariableContext, resolve_variables,
};

fn workspace_ctx(active: &str) -> VariableContext {
    VariableContext::new(Some(PathBuf::from(active)), vec![PathBuf::from("/home/dev/proj")])
}

// ---------------------------------------------------------------------------
// Token parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_mixed_filter_list() {
    let tokens = tabshift_filters::parse_filter_list(&[
        "pinned",
        "webview",
        "title:Welcome*",
        "path:${workspaceFolder}/dist/**",
        "lang:markdown",
        "pinnned",
    ]);

    assert_eq!(tokens[0], FilterToken::Keyword(Keyword::Pinned));
    assert_eq!(tokens[1], FilterToken::Keyword(Keyword::Kind(ContentKind::Webview)));
    assert!(matches!(
        &tokens[2],
        FilterToken::Pattern { kind: PatternKind::Title, pattern } if pattern == "Welcome*"
    ));
    assert!(matches!(
        &tokens[3],
        FilterToken::Pattern { kind: PatternKind::Path, .. }
    ));
    assert!(matches!(
        &tokens[4],
        FilterToken::Pattern { kind: PatternKind::Lang, .. }
    ));
    assert!(tokens[5].is_unknown());
}

#[test]
fn strict_parse_reports_typos() {
    let err = FilterToken::parse_strict("pinnned").unwrap_err();
    assert!(err.to_string().contains("pinnned"));
}

// ---------------------------------------------------------------------------
// path: filters with variables
// ---------------------------------------------------------------------------

#[test]
fn path_glob_matches_test_folder_only() {
    let predicate =
        BlockingPredicate::from_filters(&["path:**/test/*.ts"]).with_path_style(false);
    let vars = workspace_ctx("/home/dev/proj/src/main.ts");
    let env = FilterEnv::new(&NoDocuments, &vars);

    let inside = TabDescriptor::new("unit.ts").with_resource("/home/dev/proj/test/unit.ts");
    let outside = TabDescriptor::new("unit.ts").with_resource("/home/dev/proj/src/unit.ts");
    let nested = TabDescriptor::new("deep.ts").with_resource("/home/dev/proj/test/e2e/deep.ts");

    assert!(predicate.is_blocking(&inside, &env));
    assert!(!predicate.is_blocking(&outside, &env));
    assert!(!predicate.is_blocking(&nested, &env));
}

#[test]
fn workspace_relative_path_filter() {
    let predicate = BlockingPredicate::from_filters(&["path:${workspaceFolder}/docs/**"])
        .with_path_style(false);
    let vars = workspace_ctx("/home/dev/proj/src/lib.rs");
    let env = FilterEnv::new(&NoDocuments, &vars);

    let doc = TabDescriptor::new("guide.md").with_resource("/home/dev/proj/docs/user/guide.md");
    let src = TabDescriptor::new("lib.rs").with_resource("/home/dev/proj/src/lib.rs");
    assert!(predicate.is_blocking(&doc, &env));
    assert!(!predicate.is_blocking(&src, &env));
}

#[test]
fn sibling_filter_tracks_active_file() {
    let predicate = BlockingPredicate::from_filters(&["path:${fileDirname}${/}*.test.ts"])
        .with_path_style(std::path::MAIN_SEPARATOR == '\\');
    let sibling = TabDescriptor::new("a.test.ts").with_resource(
        PathBuf::from("/home/dev/proj/src").join("a.test.ts"),
    );

    let in_src = VariableContext::new(
        Some(PathBuf::from("/home/dev/proj/src").join("a.ts")),
        vec![],
    );
    let in_lib = VariableContext::new(
        Some(PathBuf::from("/home/dev/proj/lib").join("a.ts")),
        vec![],
    );

    assert!(predicate.is_blocking(&sibling, &FilterEnv::new(&NoDocuments, &in_src)));
    assert!(!predicate.is_blocking(&sibling, &FilterEnv::new(&NoDocuments, &in_lib)));
}

#[test]
fn path_filter_without_focus_matches_literal_remainder() {
    let predicate =
        BlockingPredicate::from_filters(&["path:${fileDirname}/*"]).with_path_style(false);
    let vars = VariableContext::default();
    let env = FilterEnv::new(&NoDocuments, &vars);

    // "${fileDirname}" expands to "" so the pattern becomes "/*"
    assert_eq!(resolve_variables("${fileDirname}/*", &vars), "/*");
    assert!(predicate.is_blocking(&TabDescriptor::new("x").with_resource("/x"), &env));
    assert!(!predicate.is_blocking(&TabDescriptor::new("y").with_resource("/a/y"), &env));
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn untitled_and_lang_use_documents() {
    let mut documents = HashMap::new();
    documents.insert(
        PathBuf::from("untitled:Untitled-1"),
        DocumentInfo::new("plaintext").untitled(),
    );
    documents.insert(PathBuf::from("/p/README.md"), DocumentInfo::new("markdown"));

    let predicate = BlockingPredicate::from_filters(&["untitled", "lang:mark*"]);
    let vars = VariableContext::default();
    let env = FilterEnv::new(&documents, &vars);

    let scratch = TabDescriptor::new("Untitled-1").with_resource("untitled:Untitled-1");
    let readme = TabDescriptor::new("README.md").with_resource("/p/README.md");
    let code = TabDescriptor::new("main.rs").with_resource("/p/main.rs");

    assert_eq!(
        predicate.first_match(&scratch, &env),
        Some(&FilterToken::Keyword(Keyword::Untitled))
    );
    assert!(predicate.is_blocking(&readme, &env));
    assert!(!predicate.is_blocking(&code, &env));
}

// ---------------------------------------------------------------------------
// Disjunction
// ---------------------------------------------------------------------------

#[test]
fn duplicates_and_order_do_not_change_the_decision() {
    let vars = VariableContext::default();
    let env = FilterEnv::new(&NoDocuments, &vars);
    let forward = BlockingPredicate::from_filters(&["dirty", "title:*.md", "dirty"]);
    let backward = BlockingPredicate::from_filters(&["title:*.md", "dirty"]);

    let tabs = [
        TabDescriptor::new("a.md"),
        TabDescriptor::new("b.rs").dirty(),
        TabDescriptor::new("c.rs"),
        TabDescriptor::new("d.md").dirty(),
    ];
    for tab in &tabs {
        assert_eq!(forward.is_blocking(tab, &env), backward.is_blocking(tab, &env));
    }
}
