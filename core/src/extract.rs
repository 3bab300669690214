//! Template extraction from the affordances of a self link.
use crate::error::EncodeError;
use crate::link::{Link, SELF_REL};
use crate::template::{Property, Template, Templates};

/// Builds the template map from the affordances of the first self link.
///
/// A resource without a self link has no templates, which is a normal
/// outcome. Affordances are walked in attachment order: the first one is
/// stored under [`Template::DEFAULT_KEY`], every further one under its own
/// method name. Each affordance must target the path of the expanded self
/// href, anything else fails with [`EncodeError::UriMismatch`].
pub fn extract_templates(links: &[Link]) -> Result<Templates, EncodeError> {
    let mut templates = Templates::new();
    let self_link = match links.iter().find(|link| link.rel == SELF_REL) {
        Some(link) => link,
        None => return Ok(templates),
    };
    let expanded = self_link.expanded_href();
    let self_path = uri_path(&expanded);
    for affordance in &self_link.affordances {
        if affordance.uri != self_path {
            return Err(EncodeError::mismatch(&affordance.uri, self_path));
        }
        let mut template = Template::new(affordance.method);
        for field in &affordance.fields {
            template.properties.push(Property {
                required: field.required,
                ..Property::new(field.name.clone())
            });
        }
        let key = if templates.is_empty() {
            Template::DEFAULT_KEY.to_string()
        } else {
            affordance.name.clone()
        };
        template.key = key.clone();
        templates.insert(key, template);
    }
    Ok(templates)
}

/// Returns the path component of an href, cutting authority, query and
/// fragment. A relative href is its own path.
fn uri_path(href: &str) -> &str {
    let path = match href.find("://") {
        Some(idx) => {
            let rest = &href[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            }
        }
        None => href,
    };
    match path.find(|c| c == '?' || c == '#') {
        Some(end) => &path[..end],
        None => path,
    }
}
