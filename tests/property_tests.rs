use bodyfmt::{Document, INVALID_XML, prettify_xml};
use proptest::prelude::*;

/// A small element tree without mixed content.
#[derive(Debug, Clone)]
enum Tree {
    Leaf {
        name: String,
        attrs: Vec<String>,
        text: Option<String>,
    },
    Branch {
        name: String,
        attrs: Vec<String>,
        comment: Option<String>,
        children: Vec<Tree>,
    },
}
impl Tree {
    fn to_xml(&self) -> String {
        match self {
            Tree::Leaf { name, attrs, text } => {
                let attrs = render_attrs(attrs);
                match text {
                    Some(text) => format!("<{name}{attrs}>{text}</{name}>"),
                    None => format!("<{name}{attrs}></{name}>"),
                }
            }
            Tree::Branch {
                name,
                attrs,
                comment,
                children,
            } => {
                let attrs = render_attrs(attrs);
                let comment = comment
                    .as_ref()
                    .map(|c| format!("<!--{c}-->"))
                    .unwrap_or_default();
                let children: String = children.iter().map(Tree::to_xml).collect();
                format!("<{name}{attrs}> {comment}\n{children}</{name}>")
            }
        }
    }
}

fn render_attrs(values: &[String]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!(r#" a{i}="{v}""#))
        .collect()
}

fn tree() -> impl Strategy<Value = Tree> {
    let name = "[a-z]{1,6}";
    let attrs = prop::collection::vec("[a-z0-9 ]{0,8}", 0..3);

    let leaf = (name, attrs.clone(), prop::option::of("[A-Za-z0-9][A-Za-z0-9 .]{0,12}"))
        .prop_map(|(name, attrs, text)| Tree::Leaf { name, attrs, text });

    leaf.prop_recursive(4, 32, 4, move |inner| {
        (
            name,
            attrs.clone(),
            prop::option::of("[a-z ]{0,10}"),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(name, attrs, comment, children)| Tree::Branch {
                name,
                attrs,
                comment,
                children,
            })
    })
}

proptest! {
    #[test]
    fn formatting_is_idempotent(tree in tree()) {
        let src = tree.to_xml();
        let once = prettify_xml(&src);
        prop_assert_ne!(&once, INVALID_XML);

        let twice = prettify_xml(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn formatting_keeps_element_count(tree in tree()) {
        let src = tree.to_xml();
        let once = prettify_xml(&src);

        let before = Document::parse(&src).map(|d| count(d.root()));
        let after = Document::parse(&once).map(|d| count(d.root()));
        prop_assert_eq!(before.ok(), after.ok());
    }

    #[test]
    fn output_lines_have_no_trailing_whitespace(tree in tree()) {
        let once = prettify_xml(&tree.to_xml());
        for line in once.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
    }
}

fn count(element: Option<&bodyfmt::ElementNode<'_>>) -> usize {
    element.map_or(0, |element| {
        1 + element
            .children()
            .iter()
            .map(|child| count(child.as_element()))
            .sum::<usize>()
    })
}
