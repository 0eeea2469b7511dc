use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::DiagramEngine;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// One directive received by a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Diagram(String),
    Node {
        id: String,
        label: String,
        style: String,
    },
    Link {
        source: String,
        target: String,
    },
    Layout,
}

/// Diagram engine double that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub directives: Vec<Directive>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style string of the node with `id`, if it was added.
    pub fn style_of(&self, id: &str) -> Option<&str> {
        self.directives.iter().find_map(|d| match d {
            Directive::Node { id: node_id, style, .. } if node_id == id => Some(style.as_str()),
            _ => None,
        })
    }

    pub fn pages(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::Diagram(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DiagramEngine for RecordingEngine {
    fn add_diagram(&mut self, name: &str) {
        self.directives.push(Directive::Diagram(name.to_string()));
    }

    fn add_node(&mut self, id: &str, label: &str, style: &str) {
        self.directives.push(Directive::Node {
            id: id.to_string(),
            label: label.to_string(),
            style: style.to_string(),
        });
    }

    fn add_link(&mut self, source: &str, target: &str) {
        self.directives.push(Directive::Link {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    fn layout(&mut self) {
        self.directives.push(Directive::Layout);
    }

    fn dump_xml(&self) -> String {
        format!("{:?}", self.directives)
    }
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }
}
