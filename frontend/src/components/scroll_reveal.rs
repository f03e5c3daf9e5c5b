use crate::dom::Node;

const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Fade-and-rise for elements entering the viewport. One way: revealed elements stay revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReveal {
    pub threshold: f64,
    pub root_margin: String,
    pub selector: String,
}

impl ScrollReveal {
    pub fn new(threshold: f64, root_margin: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            threshold,
            root_margin: root_margin.into(),
            selector: selector.into(),
        }
    }

    /// Puts an element in its pre-reveal state before it is observed.
    pub fn prepare<N: Node>(&self, node: &N) {
        node.set_style("opacity", "0");
        node.set_style("transform", "translateY(30px)");
        node.set_style("transition", REVEAL_TRANSITION);
    }

    /// Returns true when the element was revealed and no longer needs watching.
    pub fn on_intersection<N: Node>(&self, node: &N, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        node.set_style("opacity", "1");
        node.set_style("transform", "translateY(0)");
        true
    }
}
