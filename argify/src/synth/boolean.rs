//! Enable/disable switches for boolean fields.

use super::naming::{self, Switch};
use super::{SynthContext, Synthesized};
use crate::option::{Arity, OptionAction, OptionDescriptor};
use crate::schema::FieldDescriptor;
use crate::ArgifyResult;

/// Required booleans get both switches in one exclusive group; defaulted
/// booleans get only the switch that changes the default.
pub(super) fn synthesize(
    field: &FieldDescriptor,
    base: OptionDescriptor,
    ctx: &SynthContext<'_>,
) -> ArgifyResult<Synthesized> {
    let stems = naming::boolean_stems(field, ctx)?;
    let switch = |which: Switch| -> ArgifyResult<OptionDescriptor> {
        let prefix = naming::prefix(field, ctx, which)?;
        let action = match which {
            Switch::Enable => OptionAction::StoreTrue,
            Switch::Disable => OptionAction::StoreFalse,
        };
        Ok(OptionDescriptor {
            flags: stems.iter().map(|stem| format!("{prefix}{stem}")).collect(),
            arity: Arity::None,
            action,
            required: false,
            ..base.clone()
        })
    };

    if field.is_required() {
        return Ok(Synthesized::Exclusive {
            required: base.required,
            options: vec![switch(Switch::Enable)?, switch(Switch::Disable)?],
        });
    }

    let which = if base.default.as_ref().and_then(serde_json::Value::as_bool) == Some(true) {
        Switch::Disable
    } else {
        Switch::Enable
    };
    Ok(Synthesized::Options(vec![switch(which)?]))
}
