//! Collection compiler.
//!
//! Turns the declared collections into source plugin descriptors and URL
//! templates.
//!
//! # Generic sources
//!
//! Three catch-all sources always exist and come first:
//!
//! | Type name    | Plugin              | Claims                                   |
//! |--------------|---------------------|------------------------------------------|
//! | `Article`    | `source-filesystem` | `<md>/**/index.md`                       |
//! | `Insert`     | `source-filesystem` | `<md>/**/*.md` except `index.md`         |
//! | `VueArticle` | `vue-remark`        | everything under `<vue>`                 |
//!
//! Every custom collection carves itself out of the matching catch-all:
//! markdown collections add a negated glob to `Article`, vue collections add
//! their bare path to `VueArticle`'s `ignore`. No two sources ever claim the
//! same page.
//!
//! # Passes
//!
//! 1. Resolve every declared collection into a typed [`Collection`]. An unknown
//!    `type` fails here, before anything is built.
//! 2. Fold the typed collections into the exclusion lists and the custom
//!    descriptors, then build the generic descriptors from the finished lists.

pub mod plugins;
pub mod templates;

use crate::{
    config::{Collection, Collections, ConfigError, SiteConfig},
    utils::path::{bare_path, content_dir_depth, join_path, rm_suffix},
};
use plugins::{PluginDescriptor, RemarkPlugin, SourcePath, VueRemarkOptions, remark_plugins};
use templates::{TemplateFunction, Templates};

pub const ARTICLE: &str = "Article";
pub const INSERT: &str = "Insert";
pub const VUE_ARTICLE: &str = "VueArticle";

/// URL prefix of `Insert` pages.
const INSERT_PREFIX: &str = "insert";

/// Output of the collection compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCollections {
    /// Generic sources first, then one per custom collection in declaration order.
    pub plugins: Vec<PluginDescriptor>,
    pub templates: Templates,
}

impl CompiledCollections {
    pub fn plugin(&self, type_name: &str) -> Option<&PluginDescriptor> {
        self.plugins
            .iter()
            .find(|plugin| plugin.type_name() == Some(type_name))
    }
}

/// Compiler bound to one set of content directories.
#[derive(Debug, Clone)]
pub struct CollectionCompiler {
    md_dir: String,
    vue_dir: String,
    templates_dir: String,
    depth: usize,
    remark: Vec<RemarkPlugin>,
}

/// Exclusions and custom sources accumulated in pass 2.
#[derive(Debug, Default)]
struct Fold {
    article_excludes: Vec<String>,
    vue_ignore: Vec<String>,
    custom: Vec<PluginDescriptor>,
}

impl CollectionCompiler {
    pub fn new(md_dir: &str, vue_dir: &str, templates_dir: &str) -> Self {
        Self {
            md_dir: rm_suffix(md_dir, "/").to_owned(),
            vue_dir: rm_suffix(vue_dir, "/").to_owned(),
            templates_dir: rm_suffix(templates_dir, "/").to_owned(),
            depth: content_dir_depth(md_dir),
            remark: remark_plugins(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        let build = &config.build;
        Self::new(&build.dirs.md, &build.dirs.vue, &build.templates)
    }

    /// Compile `collections` into plugins and templates.
    pub fn compile(&self, collections: &Collections) -> Result<CompiledCollections, ConfigError> {
        let collections = collections.resolve()?;

        let fold = collections
            .iter()
            .fold(Fold::default(), |fold, collection| self.add(fold, collection));

        let mut plugins = self.generic_plugins(fold.article_excludes, fold.vue_ignore);
        plugins.extend(fold.custom);

        Ok(CompiledCollections {
            plugins,
            templates: self.templates(&collections),
        })
    }

    fn add(&self, mut fold: Fold, collection: &Collection) -> Fold {
        match collection {
            Collection::Markdown { name, path } => {
                let glob = self.collection_glob(path);
                fold.article_excludes.push(format!("!{glob}"));
                fold.custom
                    .push(PluginDescriptor::filesystem(name, SourcePath::Single(glob)));
            }
            Collection::VueTemplate { name, path } => {
                let bare = bare_path(path);
                fold.vue_ignore.push(bare.to_owned());
                fold.custom.push(PluginDescriptor::vue_remark(VueRemarkOptions {
                    type_name: name.clone(),
                    base_dir: join_path(&self.vue_dir, bare),
                    path_prefix: format!("/{bare}"),
                    ignore: Vec::new(),
                    template: self.template_file(name),
                    plugins: self.remark.clone(),
                }));
            }
        }
        fold
    }

    fn generic_plugins(
        &self,
        article_excludes: Vec<String>,
        vue_ignore: Vec<String>,
    ) -> Vec<PluginDescriptor> {
        let md = &self.md_dir;

        let mut article_paths = vec![format!("{md}/**/index.md")];
        article_paths.extend(article_excludes);

        vec![
            PluginDescriptor::filesystem(ARTICLE, SourcePath::List(article_paths)),
            PluginDescriptor::filesystem(
                INSERT,
                SourcePath::List(vec![format!("{md}/**/*.md"), format!("!{md}/**/index.md")]),
            ),
            PluginDescriptor::vue_remark(VueRemarkOptions {
                type_name: VUE_ARTICLE.into(),
                base_dir: self.vue_dir.clone(),
                path_prefix: "/".into(),
                ignore: vue_ignore,
                template: self.template_file(VUE_ARTICLE),
                plugins: self.remark.clone(),
            }),
        ]
    }

    fn templates(&self, collections: &[Collection]) -> Templates {
        let strip = TemplateFunction::StripPrefix { depth: self.depth };

        let mut templates = Templates::new();
        templates.insert(ARTICLE, strip.clone());
        templates.insert(
            INSERT,
            TemplateFunction::FilenamePath {
                prefix: INSERT_PREFIX.into(),
                depth: self.depth,
            },
        );
        for collection in collections {
            if let Collection::Markdown { name, .. } = collection {
                templates.insert(name, strip.clone());
            }
        }
        templates
    }

    /// `<md>/<path>/*/index.md`
    fn collection_glob(&self, path: &str) -> String {
        join_path(&join_path(&self.md_dir, path), "*/index.md")
    }

    fn template_file(&self, type_name: &str) -> String {
        format!("{}/{type_name}.vue", self.templates_dir)
    }
}

/// Compile the collections declared in `config`.
pub fn compile(config: &SiteConfig) -> Result<CompiledCollections, ConfigError> {
    CollectionCompiler::from_config(config).compile(&config.collections)
}

#[cfg(test)]
mod tests {
    use super::plugins::{PluginOptions, SOURCE_FILESYSTEM, VUE_REMARK};
    use super::*;
    use crate::{config::CollectionSpec, node::ContentNode};
    use serde_json::json;

    fn compiler() -> CollectionCompiler {
        CollectionCompiler::new("content", "vue-content", "src/templates")
    }

    fn collections(entries: &[(&str, &str, &str)]) -> Collections {
        entries
            .iter()
            .map(|(name, kind, path)| (*name, CollectionSpec::new(*kind, *path)))
            .collect()
    }

    fn article_globs(compiled: &CompiledCollections) -> Vec<String> {
        match &compiled.plugin(ARTICLE).unwrap().options {
            PluginOptions::Filesystem(opts) => opts.path.globs().to_vec(),
            other => panic!("Article is not a filesystem source: {other:?}"),
        }
    }

    fn vue_article_ignore(compiled: &CompiledCollections) -> Vec<String> {
        match &compiled.plugin(VUE_ARTICLE).unwrap().options {
            PluginOptions::VueRemark(opts) => opts.ignore.clone(),
            other => panic!("VueArticle is not a vue-remark source: {other:?}"),
        }
    }

    #[test]
    fn test_no_collections() {
        let compiled = compiler().compile(&Collections::new()).unwrap();

        let types: Vec<_> = compiled.plugins.iter().filter_map(|p| p.type_name()).collect();
        assert_eq!(types, vec![ARTICLE, INSERT, VUE_ARTICLE]);
        assert_eq!(article_globs(&compiled), vec!["content/**/index.md"]);
        assert!(vue_article_ignore(&compiled).is_empty());

        let names: Vec<_> = compiled.templates.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![ARTICLE, INSERT]);
    }

    #[test]
    fn test_insert_source_excludes_index_files() {
        let compiled = compiler().compile(&Collections::new()).unwrap();
        let json = serde_json::to_value(compiled.plugin(INSERT).unwrap()).unwrap();

        assert_eq!(
            json["options"]["path"],
            json!(["content/**/*.md", "!content/**/index.md"])
        );
    }

    #[test]
    fn test_docs_example() {
        let compiled = compiler()
            .compile(&collections(&[("Docs", "md", "docs")]))
            .unwrap();

        assert!(article_globs(&compiled).contains(&"!content/docs/*/index.md".to_string()));

        let docs = serde_json::to_value(compiled.plugin("Docs").unwrap()).unwrap();
        assert_eq!(
            docs,
            json!({
                "use": SOURCE_FILESYSTEM,
                "options": { "typeName": "Docs", "path": "content/docs/*/index.md" }
            })
        );
    }

    #[test]
    fn test_vue_collection() {
        let compiled = compiler()
            .compile(&collections(&[("Event", "vue", "/events/")]))
            .unwrap();

        assert_eq!(vue_article_ignore(&compiled), vec!["events"]);

        let event = compiled.plugin("Event").unwrap();
        assert_eq!(event.plugin, VUE_REMARK);
        let PluginOptions::VueRemark(opts) = &event.options else {
            panic!("expected vue-remark options");
        };
        assert_eq!(opts.base_dir, "vue-content/events");
        assert_eq!(opts.path_prefix, "/events");
        assert!(opts.ignore.is_empty());
        assert_eq!(opts.template, "src/templates/Event.vue");
        assert_eq!(opts.plugins, remark_plugins());

        // vue collections get no template entry; vue-remark routes them itself
        assert!(compiled.templates.get("Event").is_none());
    }

    #[test]
    fn test_generic_vue_article_options() {
        let compiled = compiler().compile(&Collections::new()).unwrap();
        let PluginOptions::VueRemark(opts) = &compiled.plugin(VUE_ARTICLE).unwrap().options else {
            panic!("expected vue-remark options");
        };

        assert_eq!(opts.base_dir, "vue-content");
        assert_eq!(opts.path_prefix, "/");
        assert_eq!(opts.template, "src/templates/VueArticle.vue");
    }

    #[test]
    fn test_plugin_and_template_counts() {
        let input = collections(&[
            ("Platform", "md", "use"),
            ("Event", "vue", "events"),
            ("News", "md", "news"),
            ("Webinar", "vue", "webinars/"),
        ]);
        let compiled = compiler().compile(&input).unwrap();

        assert_eq!(compiled.plugins.len(), 3 + input.len());
        // Article + Insert + md collections
        assert_eq!(compiled.templates.len(), 2 + 2);
        assert!(compiled.templates.get("Platform").is_some());
        assert!(compiled.templates.get("News").is_some());
    }

    #[test]
    fn test_custom_plugins_follow_declaration_order() {
        let input = collections(&[
            ("Zeta", "md", "zeta"),
            ("Alpha", "vue", "alpha"),
            ("Mid", "md", "mid"),
        ]);
        let compiled = compiler().compile(&input).unwrap();

        let types: Vec<_> = compiled.plugins.iter().filter_map(|p| p.type_name()).collect();
        assert_eq!(types, vec![ARTICLE, INSERT, VUE_ARTICLE, "Zeta", "Alpha", "Mid"]);
        assert_eq!(
            article_globs(&compiled),
            vec![
                "content/**/index.md",
                "!content/zeta/*/index.md",
                "!content/mid/*/index.md",
            ]
        );
    }

    #[test]
    fn test_every_md_collection_excluded_from_article() {
        let input = collections(&[("A", "md", "a"), ("B", "md", "b/c"), ("C", "vue", "c")]);
        let compiled = compiler().compile(&input).unwrap();
        let globs = article_globs(&compiled);

        for name in ["A", "B"] {
            let PluginOptions::Filesystem(opts) = &compiled.plugin(name).unwrap().options else {
                panic!("expected filesystem options");
            };
            let own = &opts.path.globs()[0];
            assert!(globs.contains(&format!("!{own}")), "{own} not excluded");
        }
        assert_eq!(globs.len(), 3);
    }

    #[test]
    fn test_invalid_type_fails_without_output() {
        let input = collections(&[("Docs", "md", "docs"), ("Data", "json", "data")]);
        let err = compiler().compile(&input).unwrap_err();

        match err {
            ConfigError::InvalidCollectionType { name, kind } => {
                assert_eq!(name, "Data");
                assert_eq!(kind, "json");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_slash_dirs() {
        let compiler = CollectionCompiler::new("build/content-md/", "build/content-vue/", "tpl/");
        let compiled = compiler
            .compile(&collections(&[("Docs", "md", "docs/"), ("Event", "vue", "events")]))
            .unwrap();

        assert_eq!(
            article_globs(&compiled),
            vec![
                "build/content-md/**/index.md",
                "!build/content-md/docs/*/index.md"
            ]
        );
        let PluginOptions::VueRemark(opts) = &compiled.plugin("Event").unwrap().options else {
            panic!("expected vue-remark options");
        };
        assert_eq!(opts.base_dir, "build/content-vue/events");
        assert_eq!(opts.template, "tpl/Event.vue");
    }

    #[test]
    fn test_templates_strip_content_depth() {
        let compiler = CollectionCompiler::new("build/content-md", "vue", "src/templates");
        let compiled = compiler
            .compile(&collections(&[("Docs", "md", "docs")]))
            .unwrap();

        let node = ContentNode::new("/build/content-md/docs/install/");
        let url = compiled.templates.resolve("Docs", &node).unwrap().unwrap();
        assert_eq!(url, "/docs/install/");

        let url = compiled.templates.resolve(ARTICLE, &node).unwrap().unwrap();
        assert_eq!(url, "/docs/install/");
    }

    #[test]
    fn test_compile_from_config() {
        let config = SiteConfig::from_str(
            r#"
            host = "galaxyproject.org"

            [build.dirs]
            md = "content"
            vue = "content"

            [collections.Docs]
            type = "md"
            path = "docs"
        "#,
        )
        .unwrap();
        let compiled = compile(&config).unwrap();

        assert_eq!(compiled.plugins.len(), 4);
        assert!(article_globs(&compiled).contains(&"!content/docs/*/index.md".to_string()));
    }
}
