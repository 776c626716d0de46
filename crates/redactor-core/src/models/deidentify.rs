use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::InfoType;

/// Literal value written in place of a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementValue {
    pub string_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceConfig {
    pub new_value: ReplacementValue,
}

/// Masks characters of a finding with a fixed character
///
/// With `reverse_order` set, masking starts from the end of the value, so the
/// trailing `number_to_mask` characters are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMaskConfig {
    pub masking_character: char,
    pub number_to_mask: u32,
    #[serde(default)]
    pub reverse_order: bool,
}

/// Transformation applied to every finding of the rule's info type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveTransformation {
    #[serde(rename = "replaceConfig")]
    Replace(ReplaceConfig),
    #[serde(rename = "characterMaskConfig")]
    CharacterMask(CharacterMaskConfig),
}

/// One info type and the transformation applied to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRule {
    pub info_types: Vec<InfoType>,
    pub primitive_transformation: PrimitiveTransformation,
}

impl TransformationRule {
    /// Replace findings of `info_type` with a literal string
    pub fn replace(info_type: &str, new_value: impl Into<String>) -> Self {
        Self {
            info_types: vec![InfoType::new(info_type)],
            primitive_transformation: PrimitiveTransformation::Replace(ReplaceConfig {
                new_value: ReplacementValue {
                    string_value: new_value.into(),
                },
            }),
        }
    }

    /// Mask the last `number_to_mask` characters of findings of `info_type`
    pub fn mask_trailing(info_type: &str, masking_character: char, number_to_mask: u32) -> Self {
        Self {
            info_types: vec![InfoType::new(info_type)],
            primitive_transformation: PrimitiveTransformation::CharacterMask(
                CharacterMaskConfig {
                    masking_character,
                    number_to_mask,
                    reverse_order: true,
                },
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoTypeTransformations {
    pub transformations: Vec<TransformationRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyConfig {
    pub info_type_transformations: InfoTypeTransformations,
}

/// De-identification template as sent to and returned by the DLP API
///
/// `name`, `create_time` and `update_time` are assigned by the service and are
/// only present on responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub display_name: String,
    pub deidentify_config: DeidentifyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl DeidentifyTemplate {
    /// Build a template from rules, rejecting two rules for the same info type.
    pub fn new(
        display_name: impl Into<String>,
        rules: Vec<TransformationRule>,
    ) -> Result<Self, anyhow::Error> {
        let mut seen = HashSet::new();
        for info_type in rules.iter().flat_map(|rule| rule.info_types.iter()) {
            if !seen.insert(info_type.name.as_str()) {
                return Err(anyhow::anyhow!(
                    "Duplicate transformation rule for info type {}",
                    info_type.name
                ));
            }
        }

        Ok(Self {
            name: None,
            display_name: display_name.into(),
            deidentify_config: DeidentifyConfig {
                info_type_transformations: InfoTypeTransformations {
                    transformations: rules,
                },
            },
            create_time: None,
            update_time: None,
        })
    }

    pub fn rules(&self) -> &[TransformationRule] {
        &self
            .deidentify_config
            .info_type_transformations
            .transformations
    }
}

/// Body of `projects.deidentifyTemplates.create`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeidentifyTemplateRequest<'a> {
    pub deidentify_template: &'a DeidentifyTemplate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}
