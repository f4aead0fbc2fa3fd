//! HTML serialization (element tree → HTML string)
//!
//! Pipeline: [`Fragment`] → RcDom handles → html5ever serializer → HTML string
//!
//! This produces the same text a detached container's `innerHTML` would:
//! character data is escaped, void elements get no end tag. Attributes come
//! out in name order since the tree stores them in a sorted map.

use super::{Fragment, Node};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::warn;

/// Serialize the fragment's nodes back to back
pub fn fragment_to_html(fragment: &Fragment) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for node in &fragment.nodes {
        let serializable = SerializableHandle::from(to_handle(node));
        // Writing into a Vec cannot fail short of allocation failure.
        if let Err(e) = serialize(&mut output, &serializable, opts.clone()) {
            warn!("HTML serialization failed: {e}");
            break;
        }
    }

    String::from_utf8_lossy(&output).into_owned()
}

fn to_handle(node: &Node) -> Handle {
    match node {
        Node::Text(text) => create_text(&text.content),
        Node::Element(element) => {
            let handle = create_element(
                &element.tag,
                element
                    .attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
            for child in &element.children {
                let child_handle = to_handle(child);
                child_handle.parent.set(Some(Rc::downgrade(&handle)));
                handle.children.borrow_mut().push(child_handle);
            }
            handle
        }
    }
}

/// Create an HTML element with attributes
fn create_element<'a>(tag: &str, attrs: impl Iterator<Item = (&'a str, &'a str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.into()),
        },
    })
}
