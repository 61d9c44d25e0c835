use crate::diagnostics::{AttributePath, Diagnostics};

use super::types::{Field, MergedConfig, ProviderModel, Resolved, ResolvedConfig};

/// Flags every field whose value is not known yet. All three fields are checked.
pub fn check_unknown(model: &ProviderModel, diagnostics: &mut Diagnostics) {
    for field in Field::ALL {
        if model.get(field).is_unknown() {
            diagnostics.add_attribute_error(
                AttributePath::root(field.key()),
                field.unknown_summary(),
                format!(
                    "The provider cannot create the Matrix API client as there is an unknown configuration value for {}. \
                     Either target apply the source of the value first, set the value statically in the configuration, \
                     or use the {} environment variable.",
                    field.subject(),
                    field.env_var()
                ),
            );
        }
    }
}

/// Flags every field that ended up without a value after the environment merge.
///
/// Returns the validated settings only when all three fields hold a value.
pub fn check_resolved(merged: &MergedConfig, diagnostics: &mut Diagnostics) -> Option<ResolvedConfig> {
    for field in Field::ALL {
        match merged.get(field) {
            Resolved::Value(_) => {}
            Resolved::Missing => diagnostics.add_attribute_error(
                AttributePath::root(field.key()),
                field.missing_summary(),
                format!(
                    "The provider cannot create the Matrix API client as there is a missing or empty value for {}. \
                     Set the {} value in the configuration or use the {} environment variable. \
                     If either is already set, ensure the value is not empty.",
                    field.subject(),
                    field.key(),
                    field.env_var()
                ),
            ),
            Resolved::InvalidEnv { reason } => diagnostics.add_attribute_error(
                AttributePath::root(field.key()),
                field.invalid_env_summary(),
                format!(
                    "The provider cannot read the {} environment variable: {reason}. \
                     Set the {} value in the configuration or export the variable as valid UTF-8.",
                    field.env_var(),
                    field.key()
                ),
            ),
        }
    }

    Some(ResolvedConfig {
        client_server_url: merged.client_server_url.value()?.to_string(),
        default_access_token: merged.default_access_token.value()?.to_string(),
        default_user_id: merged.default_user_id.value()?.to_string(),
    })
}
