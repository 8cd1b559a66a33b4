//! Prebuilt decorator paths for the most common registrations.

use crate::builder::DirectiveBuilder;

/// `meta:directive`, folding the decorated object in as the `handler`.
#[must_use]
#[track_caller]
pub fn directive_config() -> DirectiveBuilder {
    DirectiveBuilder::new(["meta", "directive", "handler"])
}

/// `zope:adapter`, folding the decorated object in as the `factory`.
#[must_use]
#[track_caller]
pub fn adapter_config() -> DirectiveBuilder {
    DirectiveBuilder::new(["zope", "adapter", "factory"])
}

/// `zope:subscriber`, folding the decorated object in as the `handler`.
#[must_use]
#[track_caller]
pub fn subscriber_config() -> DirectiveBuilder {
    DirectiveBuilder::new(["zope", "subscriber", "handler"])
}

/// `plone:page_config`, folding the decorated object in as the `handler`.
#[must_use]
#[track_caller]
pub fn page_config() -> DirectiveBuilder {
    DirectiveBuilder::new(["plone", "page_config", "handler"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_build_decorator_directives() {
        let adapter = adapter_config().build().unwrap();
        assert_eq!(adapter.directive().namespace(), "http://namespaces.zope.org/zope");
        assert_eq!(adapter.directive().name(), "adapter");
        assert_eq!(adapter.decorator_attribute(), Some("factory"));

        let subscriber = subscriber_config().build().unwrap();
        assert_eq!(subscriber.directive().name(), "subscriber");
        assert_eq!(subscriber.decorator_attribute(), Some("handler"));

        let meta = directive_config().build().unwrap();
        assert_eq!(meta.directive().namespace(), "http://namespaces.zope.org/meta");

        let page = page_config().build().unwrap();
        assert_eq!(page.directive().namespace(), "http://namespaces.plone.org/plone");
    }
}
