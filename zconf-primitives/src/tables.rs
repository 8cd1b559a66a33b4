//! Fixed lookup tables: namespace aliases and argument-name aliases.

/// Namespace URI assumed when a directive path carries no recognizable
/// namespace token.
pub const DEFAULT_NAMESPACE: &str = "http://namespaces.zope.org/zope";

/// Maps a short namespace alias to its canonical URI.
///
/// Returns `None` for unknown aliases; callers then either accept an explicit
/// `http…` URI token or fall back to [`DEFAULT_NAMESPACE`] without consuming
/// the token.
#[must_use]
pub fn namespace_uri(alias: &str) -> Option<&'static str> {
    Some(match alias {
        "apidoc" => "http://namespaces.zope.org/apidoc",
        "browser" => "http://namespaces.zope.org/browser",
        "cache" => "http://namespaces.zope.org/cache",
        "cmf" => "http://namespaces.zope.org/cmf",
        "faceted" => "http://namespaces.zope.org/faceted",
        "five" => "http://namespaces.zope.org/five",
        "genericsetup" | "gs" => "http://namespaces.zope.org/genericsetup",
        "grok" => "http://namespaces.zope.org/grok",
        "i18n" => "http://namespaces.zope.org/i18n",
        "kss" => "http://namespaces.zope.org/kss",
        "meta" => "http://namespaces.zope.org/meta",
        "monkey" => "http://namespaces.plone.org/monkey",
        "plone" => "http://namespaces.plone.org/plone",
        "transmogrifier" => "http://namespaces.plone.org/transmogrifier",
        "z3c" => "http://namespaces.zope.org/z3c",
        "zcml" => "http://namespaces.zope.org/zcml",
        "zope" => "http://namespaces.zope.org/zope",
        _ => return None,
    })
}

/// Collapses an accepted argument spelling to its canonical name.
///
/// Unknown names pass through unchanged, which makes repeated application a
/// no-op.
#[must_use]
pub fn canonical_argument(name: &str) -> &str {
    match name {
        "file_" => "file",
        "for_" | "adapts" | "context" => "for",
        "klass" | "class_" => "class",
        other => other,
    }
}
