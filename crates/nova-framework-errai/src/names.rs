//! Fully qualified names of the Errai / GWT types the analyzer recognizes.

pub const BOUND: &str = "org.jboss.errai.ui.shared.api.annotations.Bound";
pub const AUTO_BOUND: &str = "org.jboss.errai.ui.shared.api.annotations.AutoBound";
pub const MODEL: &str = "org.jboss.errai.ui.shared.api.annotations.Model";
/// Default value of `@Bound(converter = ...)`.
pub const NO_CONVERTER: &str = "org.jboss.errai.ui.shared.api.annotations.Bound.NO_CONVERTER";

pub const BINDABLE: &str = "org.jboss.errai.databinding.client.api.Bindable";
pub const DATA_BINDER: &str = "org.jboss.errai.databinding.client.api.DataBinder";
pub const CONVERTER: &str = "org.jboss.errai.databinding.client.api.Converter";

pub const TAKES_VALUE: &str = "com.google.gwt.user.client.TakesValue";
pub const HAS_TEXT: &str = "com.google.gwt.user.client.ui.HasText";

/// Classpath prefix used for applicability detection.
pub const ERRAI_PACKAGE_PREFIX: &str = "org.jboss.errai.";
