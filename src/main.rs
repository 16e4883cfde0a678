//! hubconf - build configuration compiler for the Galaxy Community Hub.

mod cli;
mod collection;
mod config;
mod feed;
mod logger;
mod manifest;
mod node;
mod utils;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use feed::{FeedFilter, FeedItem};
use manifest::Manifest;
use node::ContentNode;
use std::{
    fs,
    io::{Write, stdout},
    path::Path,
};
use utils::date::parse_date;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Compile {
            output,
            pretty,
            now,
        } => compile_manifest(&config, output.as_deref(), *pretty, now.as_deref()),
        Commands::Check => check_config(&config),
        Commands::Feed {
            nodes,
            now,
            max_items,
            pretty,
        } => run_feed(&config, nodes, now.as_deref(), *max_items, *pretty),
        Commands::Urls { type_name, nodes } => resolve_urls(&config, type_name, nodes),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Feed cut-off: `--now` if given, else the current time.
fn compile_date(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        None => Ok(Utc::now()),
        Some(s) => match parse_date(s) {
            Some(date) => Ok(date),
            None => bail!("`--now {s}` is not a valid date"),
        },
    }
}

fn compile_manifest(
    config: &SiteConfig,
    output: Option<&Path>,
    pretty: bool,
    now: Option<&str>,
) -> Result<()> {
    let manifest = Manifest::build(config, compile_date(now)?)?;
    let json = manifest.to_json(pretty)?;

    log!(
        "compile";
        "{} plugins, {} templates",
        manifest.plugins.len(),
        manifest.templates.len()
    );
    write_output(output, &json)
}

fn check_config(config: &SiteConfig) -> Result<()> {
    let compiled = collection::compile(config)?;

    if config.collections.is_empty() {
        log!("check"; "no custom collections");
    } else {
        log!("check"; "{} custom collections", config.collections.len());
    }
    for collection in config.collections.resolve()? {
        let sources = compiled
            .plugin(collection.name())
            .map(|plugin| plugin.sources().join(", "))
            .unwrap_or_default();
        log!(
            "check";
            "{}: {} collection at `{}` <- {sources}",
            collection.name(),
            collection.kind(),
            collection.path()
        );
    }

    let types: Vec<_> = compiled.plugins.iter().filter_map(|p| p.type_name()).collect();
    let templated: Vec<_> = compiled.templates.iter().map(|(name, _)| name).collect();
    log!("check"; "types: {}", types.join(", "));
    log!("check"; "templated: {}", templated.join(", "));
    log!(
        "check";
        "ok: {} source plugins, {} templates",
        compiled.plugins.len(),
        compiled.templates.len()
    );
    Ok(())
}

/// Read a JSON array of (possibly null) content nodes.
fn read_nodes(path: &Path) -> Result<Vec<Option<ContentNode>>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing nodes in {}", path.display()))
}

/// Feed entries the feed plugin would publish from the nodes in `nodes_path`.
fn feed_items(
    config: &SiteConfig,
    nodes_path: &Path,
    now: Option<&str>,
    max_items: Option<usize>,
) -> Result<Vec<FeedItem>> {
    let nodes = read_nodes(nodes_path)?;

    let filter = FeedFilter::new(config.rss_categories.clone(), compile_date(now)?);
    let max_items = max_items.unwrap_or(config.feed.max_items);
    let items = feed::select(&nodes, &filter, max_items)?;

    log!("feed"; "{} of {} nodes published", items.len(), nodes.len());
    Ok(items)
}

fn run_feed(
    config: &SiteConfig,
    nodes_path: &Path,
    now: Option<&str>,
    max_items: Option<usize>,
    pretty: bool,
) -> Result<()> {
    let items = feed_items(config, nodes_path, now, max_items)?;
    let json = if pretty {
        serde_json::to_string_pretty(&items)?
    } else {
        serde_json::to_string(&items)?
    };
    write_output(None, &json)
}

/// `<node path>\t<url>` for every node, resolved through `type_name`'s template.
fn url_lines(config: &SiteConfig, type_name: &str, nodes_path: &Path) -> Result<Vec<String>> {
    let compiled = collection::compile(config)?;
    let nodes = read_nodes(nodes_path)?;

    let mut lines = Vec::with_capacity(nodes.len());
    for node in nodes.iter().flatten() {
        let Some(url) = compiled.templates.resolve(type_name, node) else {
            bail!("No template for type `{type_name}`");
        };
        lines.push(format!("{}\t{}", node.path, url?));
    }

    log!("urls"; "{} nodes resolved as {type_name}", lines.len());
    Ok(lines)
}

fn resolve_urls(config: &SiteConfig, type_name: &str, nodes_path: &Path) -> Result<()> {
    let lines = url_lines(config, type_name, nodes_path)?;
    write_output(None, &lines.join("\n"))
}

/// Write `content` to `path`, or to stdout when no path is given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            log!("compile"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = stdout().lock();
            writeln!(stdout, "{content}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_compile_date_override() {
        let date = compile_date(Some("2024-01-01")).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_compile_date_invalid() {
        assert!(compile_date(Some("tomorrow")).is_err());
    }

    #[test]
    fn test_compile_date_default_is_now() {
        let before = Utc::now();
        let date = compile_date(None).unwrap();
        assert!(date >= before);
    }

    #[test]
    fn test_load_config_and_write_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hub.toml"),
            r#"
            host = "galaxyproject.org"
            rss_categories = ["news"]

            [collections.Docs]
            type = "md"
            path = "docs"
        "#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "hubconf",
            "--root",
            dir.path().to_str().unwrap(),
            "--md-dir",
            "content",
            "compile",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.build.dirs.md, "content");

        let out = dir.path().join("out/manifest.json");
        compile_manifest(&config, Some(&out), false, Some("2024-01-01")).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let article_paths = &json["plugins"][1]["options"]["path"];
        assert_eq!(article_paths[1], "!content/docs/*/index.md");
    }

    fn write_nodes(dir: &Path, json: &str) -> std::path::PathBuf {
        let path = dir.join("nodes.json");
        fs::write(&path, json).unwrap();
        path
    }

    fn hub_config() -> SiteConfig {
        SiteConfig::from_str(
            r#"
            host = "galaxyproject.org"
            rss_categories = ["news"]

            [feed]
            max_items = 2
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_urls_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(dir.path(), r#"[{ "path": "/build/content-md/news/gcc/" }, null]"#);

        let config = hub_config();
        assert!(resolve_urls(&config, collection::ARTICLE, &nodes).is_ok());
        let err = resolve_urls(&config, "Nope", &nodes).unwrap_err();
        assert!(err.to_string().contains("No template for type `Nope`"));
    }

    #[test]
    fn test_url_lines_article() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(dir.path(), r#"[{ "path": "/build/content-md/news/gcc/" }, null]"#);

        let lines = url_lines(&hub_config(), collection::ARTICLE, &nodes).unwrap();
        assert_eq!(lines, vec!["/build/content-md/news/gcc/\t/news/gcc/"]);
    }

    #[test]
    fn test_url_lines_insert_with_file_info() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(
            dir.path(),
            r#"[{
                "path": "/insert:/news/gcc/footer",
                "fileInfo": { "directory": "build/content-md/news/gcc", "name": "footer" }
            }]"#,
        );

        let lines = url_lines(&hub_config(), collection::INSERT, &nodes).unwrap();
        assert_eq!(lines, vec!["/insert:/news/gcc/footer\t/insert:/news/gcc/footer"]);
    }

    #[test]
    fn test_url_lines_insert_without_file_info() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(dir.path(), r#"[{ "path": "/events/gcc/" }]"#);

        let err = url_lines(&hub_config(), collection::INSERT, &nodes).unwrap_err();
        assert!(err.to_string().contains("has no fileInfo"));
    }

    #[test]
    fn test_feed_items_filters_and_caps() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(
            dir.path(),
            r#"[
                { "path": "/a/", "title": "A", "category": "news", "date": "2024-01-03" },
                null,
                { "path": "/b/", "title": "B", "category": "blog", "date": "2024-01-04" },
                { "path": "/c/", "title": "C", "category": "news", "date": "2024-01-05",
                  "authors": ["Alice", "Bob"] },
                { "path": "/d/", "title": "D", "category": "news", "date": "2024-01-01" },
                { "path": "/e/", "title": "E", "category": "news", "date": "2024-02-01" }
            ]"#,
        );

        let items = feed_items(&hub_config(), &nodes, Some("2024-01-10"), None).unwrap();
        let titles: Vec<_> = items.iter().filter_map(|item| item.title.as_deref()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert_eq!(items[0].author[0].name, "Alice, Bob");

        let items = feed_items(&hub_config(), &nodes, Some("2024-01-10"), Some(10)).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_feed_items_numeric_date_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(
            dir.path(),
            r#"[{ "path": "/a/", "category": "news", "date": 1704067200000 }]"#,
        );

        let err = feed_items(&hub_config(), &nodes, Some("2024-01-10"), None).unwrap_err();
        assert!(err.to_string().contains("Invalid date type Number"));
    }

    #[test]
    fn test_run_feed_bad_nodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_nodes(dir.path(), r#"{ "path": "/a/" }"#);

        let err = run_feed(&hub_config(), &nodes, None, None, false).unwrap_err();
        assert!(err.to_string().contains("parsing nodes"));
    }

    #[test]
    fn test_check_config_md_and_vue_share_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hub.toml"),
            r#"
            host = "galaxyproject.org"

            [collections.Events]
            type = "md"
            path = "events"

            [collections.VueEvents]
            type = "vue"
            path = "events"
        "#,
        )
        .unwrap();

        let cli = Cli::parse_from(["hubconf", "--root", dir.path().to_str().unwrap(), "check"]);
        let config = load_config(&cli).unwrap();
        assert!(check_config(&config).is_ok());
    }

    #[test]
    fn test_read_nodes_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = dir.path().join("nodes.json");
        fs::write(&nodes, r#"[null, { "path": "/a/", "category": "news" }]"#).unwrap();

        let nodes = read_nodes(&nodes).unwrap();
        assert!(nodes[0].is_none());
        assert_eq!(nodes[1].as_ref().unwrap().category.as_deref(), Some("news"));
    }

    #[test]
    fn test_load_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["hubconf", "--root", dir.path().to_str().unwrap(), "check"]);
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_invalid_type_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hub.toml"),
            r#"
            host = "galaxyproject.org"

            [collections.Data]
            type = "json"
            path = "data"
        "#,
        )
        .unwrap();

        let cli = Cli::parse_from(["hubconf", "--root", dir.path().to_str().unwrap(), "check"]);
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("`Data` has invalid type `json`"));
    }
}
