use arbitrary::{Arbitrary, Unstructured};

use crate::{AccountRef, Constraint, Pubkey};

/// Depth budget for generated trees, kept well inside the codec's bound so
/// every generated tree encodes successfully.
const MAX_GEN_DEPTH: usize = 6;

impl<'a> Arbitrary<'a> for AccountRef {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let choices = [AccountRef::Asset, AccountRef::Authority, AccountRef::Recipient];
        Ok(*u.choose(&choices)?)
    }
}

impl<'a> Arbitrary<'a> for Constraint {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        arbitrary_node(u, 0)
    }
}

fn arbitrary_node(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Constraint> {
    let max_variant = if depth < MAX_GEN_DEPTH { 5 } else { 2 };
    match u.int_in_range(0..=max_variant)? {
        0 => Ok(Constraint::Empty),
        1 => Ok(Constraint::OwnedBy {
            account: AccountRef::arbitrary(u)?,
            owners: arbitrary_keys(u)?,
        }),
        2 => Ok(Constraint::PubkeyMatch {
            account: AccountRef::arbitrary(u)?,
            keys: arbitrary_keys(u)?,
        }),
        3 => Ok(Constraint::Not(Box::new(arbitrary_node(u, depth + 1)?))),
        4 => Ok(Constraint::And(arbitrary_children(u, depth)?)),
        _ => Ok(Constraint::Or(arbitrary_children(u, depth)?)),
    }
}

fn arbitrary_keys(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<Pubkey>> {
    let len = u.int_in_range(0..=3)?;
    (0..len).map(|_| <Pubkey as Arbitrary<'_>>::arbitrary(u)).collect()
}

fn arbitrary_children(
    u: &mut Unstructured<'_>,
    depth: usize,
) -> arbitrary::Result<Vec<Constraint>> {
    let len = u.int_in_range(0..=3)?;
    (0..len).map(|_| arbitrary_node(u, depth + 1)).collect()
}
