//! "Did you mean" suggestions for unresolved classes.

use crate::registry::Registry;

/// A candidate and how similar it is to the query, in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub target: String,
    pub rating: f64,
}

/// Rate every candidate against `query`, best first.
///
/// Uses the Sørensen-Dice coefficient over character bigrams. Ties keep
/// their input order.
pub fn rank<'a, I>(query: &str, candidates: I) -> Vec<Rating>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ratings: Vec<Rating> = candidates
        .into_iter()
        .map(|target| Rating {
            target: target.to_string(),
            rating: strsim::sorensen_dice(query, target),
        })
        .collect();
    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ratings
}

/// Classes close to `property-[value]` that accept arbitrary values.
pub fn suggest(registry: &Registry, property: &str, value: &str, threshold: f64) -> Vec<String> {
    let candidates = registry
        .iter()
        .filter(|(_, rule)| rule.has_arbitrary())
        .map(|(name, _)| name.as_str());

    rank(property, candidates)
        .into_iter()
        .filter(|r| r.rating > threshold)
        .map(|r| format!("{}-[{}]", r.target, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::StaticRule;

    #[test]
    fn test_rank_orders_descending() {
        let ratings = rank("margin", ["padding", "margin-x", "margin"]);
        let targets: Vec<_> = ratings.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, ["margin", "margin-x", "padding"]);
        assert_eq!(ratings[0].rating, 1.0);
    }

    #[test]
    fn test_suggest_filters_and_formats() {
        let registry: Registry = [
            ("bg", StaticRule::new().prop("background")),
            ("bg-opacity", StaticRule::new().prop("opacity")),
            ("border", StaticRule::new().prop("borderWidth")),
            ("z", StaticRule::new().prop("zIndex")),
        ]
        .into_iter()
        .collect();

        // "bg-opacity" shares only one bigram with "bgg" and rates below 0.25
        let suggestions = suggest(&registry, "bgg", "red", 0.25);
        assert_eq!(suggestions, ["bg-[red]"]);

        let suggestions = suggest(&registry, "bg-opacit", "red", 0.25);
        assert_eq!(suggestions, ["bg-opacity-[red]"]);
    }

    #[test]
    fn test_suggest_orders_survivors_best_first() {
        let registry: Registry = [
            ("mar", StaticRule::new().prop("margin")),
            ("padding", StaticRule::new().prop("padding")),
            ("margin", StaticRule::new().prop("margin")),
            ("margin-x", StaticRule::new().prop(["marginLeft", "marginRight"])),
        ]
        .into_iter()
        .collect();

        // margin-x 0.86, margin 0.83, mar 0.44, padding 0.15
        let suggestions = suggest(&registry, "margin-y", "2px", 0.25);
        assert_eq!(suggestions, ["margin-x-[2px]", "margin-[2px]", "mar-[2px]"]);
    }

    #[test]
    fn test_suggest_skips_disabled_rules() {
        let registry: Registry = [
            ("container", StaticRule::new().disable_arbitrary()),
            ("contain", StaticRule::new().prop("contain")),
        ]
        .into_iter()
        .collect();

        let suggestions = suggest(&registry, "containe", "x", 0.25);
        assert_eq!(suggestions, ["contain-[x]"]);
    }
}
