use crate::core::campus::determine_campus;
use crate::domain::model::{OsmNode, Pos, PosType};
use crate::utils::error::{PosError, Result};
use std::collections::HashMap;

pub const TAG_NAME: &str = "name";
pub const TAG_STREET: &str = "addr:street";
pub const TAG_HOUSE_NUMBER: &str = "addr:housenumber";
pub const TAG_CITY: &str = "addr:city";
pub const TAG_POSTCODE: &str = "addr:postcode";
pub const TAG_AMENITY: &str = "amenity";
pub const TAG_SHOP: &str = "shop";
pub const TAG_CUISINE: &str = "cuisine";
pub const TAG_DESCRIPTION: &str = "description";

pub const DEFAULT_DESCRIPTION: &str = "Point of Sale";
const DESCRIPTION_SEPARATOR: &str = " - ";

/// Fallback when no rule in [`TYPE_RULES`] matches.
pub const DEFAULT_POS_TYPE: PosType = PosType::Cafe;

/// One entry of the POS type precedence list.
pub struct TypeRule {
    pub name: &'static str,
    pub infer: fn(&HashMap<String, String>) -> Option<PosType>,
}

/// Ordered by priority; the first rule returning `Some` decides the type.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "amenity",
        infer: type_from_amenity,
    },
    TypeRule {
        name: "shop=bakery",
        infer: type_from_shop,
    },
    TypeRule {
        name: "cuisine~coffee",
        infer: type_from_cuisine,
    },
];

/// Known `amenity` values. Any other amenity still counts as a match and
/// falls back to [`PosType::Cafe`].
const AMENITY_TYPES: &[(&str, PosType)] = &[
    ("cafe", PosType::Cafe),
    ("restaurant", PosType::Restaurant),
    ("bar", PosType::Bar),
    ("pub", PosType::Bar),
    ("fast_food", PosType::FastFood),
];

/// Tags used as the base of a generated description, in priority order.
const DESCRIPTION_BASE_TAGS: [&str; 2] = [TAG_SHOP, TAG_AMENITY];

fn type_from_amenity(tags: &HashMap<String, String>) -> Option<PosType> {
    let amenity = tags.get(TAG_AMENITY)?.to_lowercase();
    let pos_type = AMENITY_TYPES
        .iter()
        .find(|(value, _)| *value == amenity)
        .map(|(_, pos_type)| *pos_type)
        .unwrap_or(PosType::Cafe);
    Some(pos_type)
}

fn type_from_shop(tags: &HashMap<String, String>) -> Option<PosType> {
    tags.get(TAG_SHOP)
        .filter(|shop| shop.to_lowercase() == "bakery")
        .map(|_| PosType::Bakery)
}

fn type_from_cuisine(tags: &HashMap<String, String>) -> Option<PosType> {
    tags.get(TAG_CUISINE)
        .filter(|cuisine| cuisine.to_lowercase().contains("coffee"))
        .map(|_| PosType::Cafe)
}

pub fn determine_pos_type(tags: &HashMap<String, String>) -> PosType {
    TYPE_RULES
        .iter()
        .find_map(|rule| {
            let pos_type = (rule.infer)(tags)?;
            tracing::debug!("POS type rule '{}' matched: {:?}", rule.name, pos_type);
            Some(pos_type)
        })
        .unwrap_or(DEFAULT_POS_TYPE)
}

pub fn generate_description(tags: &HashMap<String, String>) -> String {
    if let Some(explicit) = tags
        .get(TAG_DESCRIPTION)
        .filter(|value| !value.trim().is_empty())
    {
        return explicit.clone();
    }

    let mut description = DESCRIPTION_BASE_TAGS
        .iter()
        .find_map(|key| tags.get(*key))
        .map(|base| capitalize(base))
        .unwrap_or_default();

    if let Some(cuisine) = tags.get(TAG_CUISINE).filter(|value| !value.trim().is_empty()) {
        if !description.is_empty() {
            description.push_str(DESCRIPTION_SEPARATOR);
        }
        description.push_str(cuisine);
    }

    if description.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        description
    }
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps OpenStreetMap nodes to unsaved [`Pos`] values. Performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsmToPosConverter;

impl OsmToPosConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, node: &OsmNode) -> Result<Pos> {
        if node.tags.is_empty() {
            tracing::error!("OSM node {} has no tags", node.node_id);
            return Err(PosError::OsmNodeMissingFields(node.node_id));
        }

        let name = required_tag(node, TAG_NAME)?;
        let street = required_tag(node, TAG_STREET)?;
        let house_number = required_tag(node, TAG_HOUSE_NUMBER)?;
        let city = required_tag(node, TAG_CITY)?;
        let postcode = required_tag(node, TAG_POSTCODE)?;

        let postal_code: i32 = postcode.parse().map_err(|_| {
            tracing::error!(
                "OSM node {} has invalid postal code: {}",
                node.node_id,
                postcode
            );
            PosError::OsmNodeMissingFields(node.node_id)
        })?;

        let pos_type = determine_pos_type(&node.tags);
        let campus = determine_campus(city, node.latitude, node.longitude);
        let description = generate_description(&node.tags);

        tracing::debug!(
            "Converted OSM node {} to POS: name={}, street={} {}, city={}",
            node.node_id,
            name,
            street,
            house_number,
            city
        );

        Ok(Pos {
            id: None,
            created_at: None,
            updated_at: None,
            name: name.to_string(),
            description,
            pos_type,
            campus,
            street: street.to_string(),
            house_number: house_number.to_string(),
            postal_code,
            city: city.to_string(),
        })
    }
}

fn required_tag<'a>(node: &'a OsmNode, key: &str) -> Result<&'a str> {
    match node.tag(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            tracing::error!(
                "OSM node {} is missing required field: {}",
                node.node_id,
                key
            );
            Err(PosError::OsmNodeMissingFields(node.node_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CampusType;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete_node(node_id: u64) -> OsmNode {
        OsmNode::new(node_id)
            .with_tag("name", "Campus Café")
            .with_tag("addr:street", "Grabengasse")
            .with_tag("addr:housenumber", "1")
            .with_tag("addr:city", "Heidelberg")
            .with_tag("addr:postcode", "69117")
    }

    #[test]
    fn test_convert_campus_cafe() {
        let node = complete_node(42)
            .with_tag("amenity", "cafe")
            .with_coordinates(49.4106, 8.7063);

        let pos = OsmToPosConverter::new().convert(&node).unwrap();

        assert_eq!(pos.id, None);
        assert_eq!(pos.name, "Campus Café");
        assert_eq!(pos.pos_type, PosType::Cafe);
        assert_eq!(pos.campus, CampusType::Altstadt);
        assert_eq!(pos.street, "Grabengasse");
        assert_eq!(pos.house_number, "1");
        assert_eq!(pos.postal_code, 69117);
        assert_eq!(pos.city, "Heidelberg");
        assert_eq!(pos.description, "Cafe");
    }

    #[test]
    fn test_name_is_kept_verbatim() {
        let node = complete_node(1).with_tag("name", "  Café  Botanik ");
        let pos = OsmToPosConverter::new().convert(&node).unwrap();
        assert_eq!(pos.name, "  Café  Botanik ");
    }

    #[test]
    fn test_empty_tags_are_missing_fields() {
        let result = OsmToPosConverter::new().convert(&OsmNode::new(7));
        assert!(matches!(result, Err(PosError::OsmNodeMissingFields(7))));
    }

    #[test]
    fn test_each_required_tag_is_checked() {
        for key in [TAG_NAME, TAG_STREET, TAG_HOUSE_NUMBER, TAG_CITY, TAG_POSTCODE] {
            let mut missing = complete_node(11);
            missing.tags.remove(key);
            let result = OsmToPosConverter::new().convert(&missing);
            assert!(
                matches!(result, Err(PosError::OsmNodeMissingFields(11))),
                "missing {} should be rejected",
                key
            );

            let blank = complete_node(12).with_tag(key, " \t ");
            let result = OsmToPosConverter::new().convert(&blank);
            assert!(
                matches!(result, Err(PosError::OsmNodeMissingFields(12))),
                "blank {} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_non_numeric_postcode_is_missing_field() {
        let node = complete_node(99).with_tag("addr:postcode", "D-69117");
        let result = OsmToPosConverter::new().convert(&node);
        assert!(matches!(result, Err(PosError::OsmNodeMissingFields(99))));
    }

    #[test]
    fn test_amenity_rules() {
        let cases = [
            ("cafe", PosType::Cafe),
            ("restaurant", PosType::Restaurant),
            ("bar", PosType::Bar),
            ("pub", PosType::Bar),
            ("fast_food", PosType::FastFood),
            ("Restaurant", PosType::Restaurant),
            ("PUB", PosType::Bar),
            ("ice_cream", PosType::Cafe),
        ];
        for (amenity, expected) in cases {
            assert_eq!(
                determine_pos_type(&tags(&[("amenity", amenity)])),
                expected,
                "amenity={}",
                amenity
            );
        }
    }

    #[test]
    fn test_amenity_wins_over_shop() {
        let result = determine_pos_type(&tags(&[("amenity", "restaurant"), ("shop", "bakery")]));
        assert_eq!(result, PosType::Restaurant);
    }

    #[test]
    fn test_shop_and_cuisine_rules() {
        assert_eq!(determine_pos_type(&tags(&[("shop", "BaKeRy")])), PosType::Bakery);
        assert_eq!(determine_pos_type(&tags(&[("shop", "butcher")])), PosType::Cafe);
        assert_eq!(
            determine_pos_type(&tags(&[("cuisine", "Coffee_Shop")])),
            PosType::Cafe
        );
        assert_eq!(determine_pos_type(&tags(&[("cuisine", "italian")])), PosType::Cafe);
        assert_eq!(determine_pos_type(&HashMap::new()), DEFAULT_POS_TYPE);
    }

    #[test]
    fn test_type_rules_order() {
        let names: Vec<&str> = TYPE_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, vec!["amenity", "shop=bakery", "cuisine~coffee"]);
    }

    #[test]
    fn test_explicit_description_wins() {
        let description = generate_description(&tags(&[
            ("description", "Best espresso near the Neckar"),
            ("shop", "bakery"),
            ("amenity", "cafe"),
            ("cuisine", "coffee_shop"),
        ]));
        assert_eq!(description, "Best espresso near the Neckar");
    }

    #[test]
    fn test_generated_descriptions() {
        assert_eq!(
            generate_description(&tags(&[("shop", "bakery"), ("cuisine", "french")])),
            "Bakery - french"
        );
        assert_eq!(
            generate_description(&tags(&[("shop", "bakery"), ("amenity", "cafe")])),
            "Bakery"
        );
        assert_eq!(
            generate_description(&tags(&[("amenity", "fast_food"), ("cuisine", "burger")])),
            "Fast_food - burger"
        );
        assert_eq!(
            generate_description(&tags(&[("cuisine", "vietnamese")])),
            "vietnamese"
        );
        assert_eq!(
            generate_description(&tags(&[("description", "  "), ("cuisine", " ")])),
            DEFAULT_DESCRIPTION
        );
        assert_eq!(generate_description(&HashMap::new()), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bakery"), "Bakery");
        assert_eq!(capitalize("fast_food"), "Fast_food");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("Cafe"), "Cafe");
        assert_eq!(capitalize(""), "");
    }
}
