//! End-to-end build of a small project through the public API.

use simple_pages::config::{self, SiteConfig};
use simple_pages::generate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "templates/page.html",
        "<!DOCTYPE html><title>{NAME}</title><article>{BODY}</article>{FOOTER}",
    );
    write(
        root,
        "templates/index.html",
        "<!DOCTYPE html><title>{NAME}</title><nav>{BODY}</nav>",
    );
    write(root, "pages/index.md", "# Pages\n\n{ENTRIES}\n\nSee readme.md too.\n");
    write(root, "pages/page-one.md", "# Hello\n\n{IMAGE a.png}\n");
    tmp
}

#[test]
fn index_lists_pages_and_pages_render_images() {
    let tmp = setup_project();
    let root = tmp.path();
    let site_config = config::load_config(root).unwrap();

    generate::build(root, &site_config).unwrap();

    let index = fs::read_to_string(root.join("index.html")).unwrap();
    assert!(index.contains("<title>Index</title>"));
    assert!(index.contains("<a href=\"src/page-one.html\">Page One</a>"));
    assert!(!index.contains("{ENTRIES}"));
    // blind extension rewrite reaches prose as well
    assert!(index.contains("See readme.html too."));

    let page = fs::read_to_string(root.join("src/page-one.html")).unwrap();
    assert!(page.contains("<title>Page One</title>"));
    let heading = page.find("<h1>Hello</h1>").unwrap();
    let image = page.find("<img src=\"../.github/a.png\">").unwrap();
    assert!(heading < image);
    // tokens the generator does not know are passed through
    assert!(page.ends_with("{FOOTER}"));
}

#[test]
fn index_document_listing_excludes_itself() {
    let tmp = setup_project();
    let root = tmp.path();
    write(root, "pages/another-page.md", "text");

    let report = generate::build(root, &SiteConfig::default()).unwrap();

    let titles: Vec<&str> = report.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Another Page", "Page One"]);

    let index = fs::read_to_string(root.join("index.html")).unwrap();
    assert_eq!(index.matches("<li>").count(), 2);
    assert!(!index.contains("src/index.html"));
}

#[test]
fn config_overrides_layout_and_prefixes() {
    let tmp = setup_project();
    let root = tmp.path();
    write(
        root,
        "config.toml",
        r#"
output_dir = "public/pages"
index_output_dir = "public"

[index]
link_prefix = "pages/"

[markup]
asset_prefix = "/img/"
"#,
    );
    let site_config = config::load_config(root).unwrap();

    generate::build(root, &site_config).unwrap();

    let index = fs::read_to_string(root.join("public/index.html")).unwrap();
    assert!(index.contains("href=\"pages/page-one.html\""));
    let page = fs::read_to_string(root.join("public/pages/page-one.html")).unwrap();
    assert!(page.contains("<img src=\"/img/a.png\">"));
}

#[test]
fn rebuild_overwrites_previous_output() {
    let tmp = setup_project();
    let root = tmp.path();
    let site_config = SiteConfig::default();

    generate::build(root, &site_config).unwrap();
    write(root, "pages/page-one.md", "# Changed\n");
    generate::build(root, &site_config).unwrap();

    let page = fs::read_to_string(root.join("src/page-one.html")).unwrap();
    assert!(page.contains("<h1>Changed</h1>"));
    assert!(!page.contains("Hello"));
}

#[test]
fn code_blocks_are_highlighted_unless_disabled() {
    let tmp = setup_project();
    let root = tmp.path();
    write(root, "pages/code.md", "```rust\nfn main() {}\n```\n");

    generate::build(root, &SiteConfig::default()).unwrap();
    let page = fs::read_to_string(root.join("src/code.html")).unwrap();
    assert!(page.contains("<pre style=\""));
    assert!(page.contains("<span"));

    write(root, "config.toml", "[markup]\nhighlight = false\n");
    let site_config = config::load_config(root).unwrap();
    generate::build(root, &site_config).unwrap();
    let page = fs::read_to_string(root.join("src/code.html")).unwrap();
    assert!(page.contains("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"));
}
