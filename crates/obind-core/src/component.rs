#![forbid(unsafe_code)]

//! The wrapped-component contract.

use crate::props::Props;

/// A presentational unit that can be rendered from a prop map.
///
/// Implementations must be pure with respect to `render`: the same props
/// produce the same output, and rendering never mutates the component.
pub trait Component {
    /// What a render produces (a widget tree, a string, a frame command list).
    type Output;

    /// Identifier surfaced to host tooling.
    fn display_name(&self) -> &str;

    /// Whether the host must provide a containing element.
    fn container_required(&self) -> bool {
        false
    }

    fn render(&self, props: &Props) -> Self::Output;
}

/// Introspection metadata copied off a [`Component`] so a wrapper can expose
/// the same identity as the unit it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMeta {
    pub display_name: String,
    pub container_required: bool,
}

impl ComponentMeta {
    #[must_use]
    pub fn of<C: Component + ?Sized>(component: &C) -> Self {
        Self {
            display_name: component.display_name().to_owned(),
            container_required: component.container_required(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label;

    impl Component for Label {
        type Output = String;

        fn display_name(&self) -> &str {
            "Label"
        }

        fn render(&self, props: &Props) -> String {
            props.to_json().to_string()
        }
    }

    struct Panel;

    impl Component for Panel {
        type Output = ();

        fn display_name(&self) -> &str {
            "Panel"
        }

        fn container_required(&self) -> bool {
            true
        }

        fn render(&self, _props: &Props) {}
    }

    #[test]
    fn meta_copies_identity() {
        assert_eq!(
            ComponentMeta::of(&Label),
            ComponentMeta {
                display_name: "Label".into(),
                container_required: false,
            }
        );
        assert!(ComponentMeta::of(&Panel).container_required);
    }

    #[test]
    fn render_is_pure() {
        let props = Props::new().with("text", "hi");
        assert_eq!(Label.render(&props), Label.render(&props));
    }
}
