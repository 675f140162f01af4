// filter.rs
use crate::extract::Listing;

/// Keep-predicate that drops listings whose structure mentions
/// `marker`. Today's only policy, but the pipeline takes any
/// `Fn(&Listing) -> bool` so the rule stays swappable.
pub fn exclude_structure(marker: String) -> impl Fn(&Listing) -> bool {
    move |listing| !listing.structure.contains(&marker)
}

/// Order-preserving filter over a finished record set.
pub fn apply_filter<F>(listings: Vec<Listing>, keep: F) -> Vec<Listing>
where
    F: Fn(&Listing) -> bool,
{
    listings.into_iter().filter(|l| keep(l)).collect()
}
