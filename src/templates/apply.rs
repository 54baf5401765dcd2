use crate::params::model::AspectRatio;
use crate::params::store::ParamStore;

use super::catalog::Template;

/// Overwrite the template's five fields; background, logo and image scale are left alone.
///
/// No field can fail to set, so the application is all-or-nothing.
pub fn apply_template(store: &mut ParamStore, template: &Template) {
    store.set_padding(i64::from(template.padding));
    store.set_border_radius(i64::from(template.border_radius));
    store.set_shadow_intensity(i64::from(template.shadow_intensity));
    store.set_shadow_inset(template.shadow_inset);
    store.set_aspect_ratio(AspectRatio::resolve(template.aspect_ratio));
    tracing::debug!(template = template.name, "template applied");
}

#[cfg(test)]
#[path = "../../tests/unit/templates/apply.rs"]
mod tests;
