//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "Galaxy Community Hub".into()
    }

    pub fn description() -> String {
        "All about Galaxy and its community.".into()
    }

    pub fn icon() -> String {
        "./src/favicon.png".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    pub fn templates() -> String {
        "src/templates".into()
    }

    pub mod dirs {
        pub fn md() -> String {
            "build/content-md".into()
        }

        pub fn vue() -> String {
            "build/content-vue".into()
        }
    }
}

// ============================================================================
// [feed] Section Defaults
// ============================================================================

pub mod feed {
    pub fn description() -> String {
        "The Galaxy Community Hub".into()
    }

    pub fn content_types() -> Vec<String> {
        vec!["Article".into(), "VueArticle".into()]
    }

    pub fn output() -> String {
        "/feed.atom".into()
    }

    pub fn max_items() -> usize {
        25
    }
}
