//! Sewing line pieces into maximal chains.

use crate::primitives::{Coord, OrdCoord};
use num_traits::Float;
use std::collections::BTreeMap;

/// Joins pieces end to end through nodes where exactly two pieces meet.
///
/// Each piece is a polyline of at least two coordinates. Chains start at
/// nodes whose degree is not two; pieces left over afterwards form closed
/// cycles. Pieces may be walked against their own direction; a finished
/// chain is reversed when most of its pieces were.
///
/// Output order is deterministic: chains are started from nodes in
/// lexicographic order, cycles from their lowest-indexed piece.
pub(crate) fn merge_pieces<F: Float>(pieces: &[Vec<Coord<F>>]) -> Vec<Vec<Coord<F>>> {
    let mut incident: BTreeMap<OrdCoord<F>, Vec<usize>> = BTreeMap::new();
    for (i, piece) in pieces.iter().enumerate() {
        if piece.len() < 2 {
            continue;
        }
        incident.entry(OrdCoord(piece[0])).or_default().push(i);
        incident.entry(OrdCoord(piece[piece.len() - 1])).or_default().push(i);
    }

    let mut used = vec![false; pieces.len()];
    let mut chains = Vec::new();

    for (node, around) in &incident {
        if around.len() == 2 {
            continue;
        }
        for &first in around {
            if !used[first] {
                chains.push(walk_chain(pieces, &incident, &mut used, first, node.0));
            }
        }
    }

    for first in 0..pieces.len() {
        if !used[first] && pieces[first].len() >= 2 {
            let start = pieces[first][0];
            chains.push(walk_chain(pieces, &incident, &mut used, first, start));
        }
    }
    chains
}

fn walk_chain<F: Float>(
    pieces: &[Vec<Coord<F>>],
    incident: &BTreeMap<OrdCoord<F>, Vec<usize>>,
    used: &mut [bool],
    first: usize,
    start: Coord<F>,
) -> Vec<Coord<F>> {
    let mut chain: Vec<Coord<F>> = vec![start];
    let mut backward = 0usize;
    let mut total = 0usize;
    let mut current = Some(first);
    let mut at = start;

    while let Some(i) = current {
        used[i] = true;
        total += 1;
        let piece = &pieces[i];
        if piece[0] == at {
            chain.extend_from_slice(&piece[1..]);
        } else {
            backward += 1;
            chain.extend(piece[..piece.len() - 1].iter().rev().copied());
        }
        at = chain[chain.len() - 1];

        current = match incident.get(&OrdCoord(at)) {
            Some(around) if around.len() == 2 => around.iter().copied().find(|&j| !used[j]),
            _ => None,
        };
    }

    if 2 * backward > total {
        chain.reverse();
    }
    chain
}
