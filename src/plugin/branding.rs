/// Produces the trailer line appended after all report sections.
///
/// Closures returning a `String` implement this directly:
///
/// ```
/// use monitoring_plugin::Plugin;
///
/// let mut plugin = Plugin::new();
/// plugin.set_branding(|| format!("check_cert v{}", "1.4.0"));
/// ```
pub trait Branding {
    fn produce_trailer(&self) -> String;
}

impl<F> Branding for F
where
    F: Fn() -> String,
{
    fn produce_trailer(&self) -> String {
        self()
    }
}

/// Fixed trailer text, used when branding comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBranding(pub String);

impl Branding for StaticBranding {
    fn produce_trailer(&self) -> String {
        self.0.clone()
    }
}
