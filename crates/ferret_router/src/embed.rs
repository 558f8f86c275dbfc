//! Embedded-media recursion (spec §4.1): when a preprocessor extracts a
//! nested file, it re-enters the router with a temporary path and a context
//! recording the parent, so a finding inside the nested file still traces
//! to a human-meaningful location.

/// Tracks the chain of parent paths a nested extraction descended through.
#[derive(Debug, Clone, Default)]
pub struct EmbedContext {
    ancestors: Vec<String>,
}

impl EmbedContext {
    pub fn root() -> Self {
        Self::default()
    }

    /// Descend one level: `child` is a temp file extracted from whatever
    /// path this context currently represents.
    pub fn descend(&self, parent_display_path: &str) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(parent_display_path.to_string());
        Self { ancestors }
    }

    /// The human-meaningful path a finding inside the nested file should be
    /// reported under: `"<parent> -> <child>"` (spec §4.1), chained across
    /// arbitrarily many levels of nesting.
    pub fn display_path(&self, leaf_name: &str) -> String {
        let mut segments = self.ancestors.clone();
        segments.push(leaf_name.to_string());
        segments.join(" -> ")
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_context_has_depth_zero() {
        assert_eq!(EmbedContext::root().depth(), 0);
    }

    #[test]
    fn single_level_renders_parent_arrow_child() {
        let ctx = EmbedContext::root().descend("report.docx");
        assert_eq!(ctx.display_path("image1.png"), "report.docx -> image1.png");
    }

    #[test]
    fn nested_levels_chain_every_ancestor() {
        let ctx = EmbedContext::root()
            .descend("archive.zip")
            .descend("archive.zip -> report.docx");
        assert_eq!(
            ctx.display_path("image1.png"),
            "archive.zip -> archive.zip -> report.docx -> image1.png"
        );
    }
}
