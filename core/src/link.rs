//! Links and the affordances attached to them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation of the link pointing at the resource itself.
pub const SELF_REL: &str = "self";

/// Transition verb carried by an affordance or template.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Safe read.
    #[default]
    Get,
    /// Create.
    Post,
    /// Full replace.
    Put,
    /// Partial update.
    Patch,
    /// Remove.
    Delete,
    /// Headers only.
    Head,
    /// Capability probe.
    Options,
}

impl Method {
    /// Returns the uppercase wire name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input field of an affordance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Whether a value must be provided.
    pub required: bool,
}

impl FieldSpec {
    /// Creates a field spec.
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }
}

/// A state transition attached to a link.
///
/// The target uri must resolve to the same path as the owning resource's
/// self link, which is checked when templates are extracted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Affordance {
    /// Method name, used as the template key after the first affordance.
    pub name: String,
    /// Transition verb.
    pub method: Method,
    /// Concrete target uri of the transition.
    pub uri: String,
    /// Declared input fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl Affordance {
    /// Creates an affordance without input fields.
    pub fn new(name: impl Into<String>, method: Method, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            uri: uri.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a declared input field.
    pub fn with_field(mut self, name: impl Into<String>, required: bool) -> Self {
        self.fields.push(FieldSpec::new(name, required));
        self
    }
}

/// An outbound link of a resource.
///
/// Affordances ride along in memory only; they never appear in the wire
/// form of the link itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    /// Relation under which the link is grouped on the wire.
    pub rel: String,
    /// Target href, possibly a uri template.
    pub href: String,
    /// Human readable title attribute.
    pub title: Option<String>,
    /// Secondary key distinguishing links that share a relation.
    pub name: Option<String>,
    /// State transitions attached to this link.
    pub affordances: Vec<Affordance>,
}

impl Link {
    /// Creates a link.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            title: None,
            name: None,
            affordances: Vec::new(),
        }
    }

    /// Creates a link with the `self` relation.
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new(SELF_REL, href)
    }

    /// Sets the title attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the name attribute.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches an affordance.
    pub fn with_affordance(mut self, affordance: Affordance) -> Self {
        self.affordances.push(affordance);
        self
    }

    /// Returns true when the href still contains template expressions.
    pub fn is_templated(&self) -> bool {
        self.href.contains('{')
    }

    /// Expands the href with no variables, dropping every template expression.
    pub fn expanded_href(&self) -> String {
        let mut out = String::with_capacity(self.href.len());
        let mut depth = 0usize;
        for c in self.href.chars() {
            match c {
                '{' => depth += 1,
                '}' if depth > 0 => depth -= 1,
                c if depth == 0 => out.push(c),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_wire_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::default(), Method::Get);
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn expands_template_expressions() {
        let link = Link::self_link("/orders{/id}{?page,size}");
        assert!(link.is_templated());
        assert_eq!(link.expanded_href(), "/orders");

        let plain = Link::self_link("/orders/1");
        assert!(!plain.is_templated());
        assert_eq!(plain.expanded_href(), "/orders/1");
    }

    #[test]
    fn fluent_construction() {
        let link = Link::new("orders", "/orders")
            .with_title("Orders")
            .with_affordance(Affordance::new("create", Method::Post, "/orders").with_field("total", true));
        assert_eq!(link.title.as_deref(), Some("Orders"));
        assert_eq!(link.affordances[0].fields[0], FieldSpec::new("total", true));
    }
}
