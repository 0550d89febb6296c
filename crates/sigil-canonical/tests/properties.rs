//! Property tests for canonicalization invariants.

use proptest::prelude::*;
use sigil_canonical::{canonicalize, decode, encode, GRID_SIZE, MAX_SIGIL_LENGTH};

/// Longest sigil explored exhaustively.
const EXPLORE_LEN: usize = 6;

const MOVES: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

fn edge(a: u8, b: u8) -> (u8, u8) {
    (a.min(b), a.max(b))
}

/// Cells reachable from `from` without leaving the grid or reusing a line.
fn open_moves(from: u8, used: &[(u8, u8)]) -> Vec<u8> {
    let (x, y) = decode(from);
    let size = GRID_SIZE as i8;
    MOVES
        .iter()
        .filter_map(|&(dx, dy)| {
            let (nx, ny) = (x as i8 + dx, y as i8 + dy);
            if !(0..size).contains(&nx) || !(0..size).contains(&ny) {
                return None;
            }
            let next = encode(nx as u32, ny as u32);
            (!used.contains(&edge(from, next))).then_some(next)
        })
        .collect()
}

/// Builds a valid sigil by walking from `start`, letting each choice pick
/// among the unused lines out of the current cell.
fn walk(start: u8, choices: &[u8]) -> Vec<u8> {
    let mut points = vec![start];
    let mut used = Vec::new();
    for &choice in choices {
        let current = points[points.len() - 1];
        let candidates = open_moves(current, &used);
        if candidates.is_empty() {
            break;
        }
        let next = candidates[usize::from(choice) % candidates.len()];
        used.push(edge(current, next));
        points.push(next);
    }
    points
}

fn arb_start() -> impl Strategy<Value = u8> {
    (0..u32::from(GRID_SIZE), 0..u32::from(GRID_SIZE)).prop_map(|(x, y)| encode(x, y))
}

fn arb_sigil() -> impl Strategy<Value = Vec<u8>> {
    (arb_start(), prop::collection::vec(any::<u8>(), 1..MAX_SIGIL_LENGTH))
        .prop_map(|(start, choices)| walk(start, &choices))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: every walk that never reuses a line is accepted.
    #[test]
    fn prop_walks_are_valid(sigil in arb_sigil()) {
        let key = canonicalize(&sigil);
        prop_assert!(key.is_some(), "rejected {:?}", sigil);
        prop_assert!(key.unwrap().looks_canonical());
    }

    /// Property: drawing a sigil backwards yields the same key.
    #[test]
    fn prop_reversal_invariance(sigil in arb_sigil()) {
        let mut reversed = sigil.clone();
        reversed.reverse();
        prop_assert_eq!(canonicalize(&sigil), canonicalize(&reversed));
    }

    /// Property: canonicalizing twice gives byte-identical keys.
    #[test]
    fn prop_determinism(sigil in prop::collection::vec(any::<u8>(), 0..=MAX_SIGIL_LENGTH + 2)) {
        let first = canonicalize(&sigil);
        let second = canonicalize(&sigil);
        prop_assert_eq!(
            first.as_ref().map(|key| key.as_bytes().to_vec()),
            second.as_ref().map(|key| key.as_bytes().to_vec())
        );
    }

    /// Property: a key's own bytes are already canonical.
    #[test]
    fn prop_canonical_form_is_fixed_point(sigil in arb_sigil()) {
        let key = canonicalize(&sigil).unwrap();
        let again = canonicalize(key.as_bytes()).unwrap();
        prop_assert_eq!(key.as_bytes(), again.as_bytes());
    }

    /// Property: every closed walk inside a sigil keeps its key under any
    /// rotation and direction.
    #[test]
    fn prop_closed_walk_rotation_invariance(
        sigil in arb_sigil(),
        pick in any::<usize>(),
    ) {
        let closed = (0..sigil.len()).find_map(|start| {
            (start + 3..sigil.len())
                .find(|&end| sigil[end] == sigil[start])
                .map(|end| &sigil[start..=end])
        });
        prop_assume!(closed.is_some());
        let closed = closed.unwrap();

        let variants = loop_variants(closed);
        let variant = &variants[pick % variants.len()];
        prop_assert_eq!(canonicalize(variant), canonicalize(closed));
    }

    /// Property: reversing any loop inside a sigil keeps the key.
    #[test]
    fn prop_sub_loop_flip_invariance(sigil in arb_sigil(), pick in any::<usize>()) {
        let flips = sub_loop_flips(&sigil);
        prop_assume!(!flips.is_empty());
        prop_assert_eq!(canonicalize(&flips[pick % flips.len()]), canonicalize(&sigil));
    }

    /// Property: arbitrary bytes never panic and never mutate the input.
    #[test]
    fn prop_arbitrary_input_is_untouched(sigil in prop::collection::vec(any::<u8>(), 0..40)) {
        let original = sigil.clone();
        if let Some(key) = canonicalize(&sigil) {
            prop_assert_eq!(key.as_bytes().len(), sigil.len());
            prop_assert!(key.looks_canonical());
        }
        prop_assert_eq!(sigil, original);
    }
}

/// Depth-first enumeration of every valid sigil up to `max_len` points.
fn explore(
    points: &mut Vec<u8>,
    used: &mut Vec<(u8, u8)>,
    max_len: usize,
    visit: &mut dyn FnMut(&[u8]),
) {
    if points.len() > 1 {
        visit(points);
    }
    if points.len() == max_len {
        return;
    }

    let current = points[points.len() - 1];
    for next in open_moves(current, used) {
        used.push(edge(current, next));
        points.push(next);
        explore(points, used, max_len, visit);
        points.pop();
        used.pop();
    }
}

/// Runs `visit` on every valid sigil of up to `max_len` points.
fn for_each_sigil(max_len: usize, visit: &mut dyn FnMut(&[u8])) {
    for x in 0..u32::from(GRID_SIZE) {
        for y in 0..u32::from(GRID_SIZE) {
            explore(&mut vec![encode(x, y)], &mut Vec::new(), max_len, visit);
        }
    }
}

/// Every rotation of a closed sigil, in both directions, closed back onto its start.
fn loop_variants(sigil: &[u8]) -> Vec<Vec<u8>> {
    let cycle = &sigil[..sigil.len() - 1];
    let mut variants = Vec::with_capacity(2 * cycle.len());
    for start in 0..cycle.len() {
        let mut forward: Vec<u8> = (0..cycle.len())
            .map(|offset| cycle[(start + offset) % cycle.len()])
            .collect();
        forward.push(forward[0]);

        let mut backward = forward.clone();
        let last = backward.len() - 1;
        backward[1..last].reverse();

        variants.push(forward);
        variants.push(backward);
    }
    variants
}

/// Every drawing reached by reversing one loop that starts and ends on the same point.
fn sub_loop_flips(sigil: &[u8]) -> Vec<Vec<u8>> {
    let mut flips = Vec::new();
    for start in 0..sigil.len() {
        for end in start + 3..sigil.len() {
            if sigil[start] == sigil[end] {
                let mut flipped = sigil.to_vec();
                flipped[start + 1..end].reverse();
                flips.push(flipped);
            }
        }
    }
    flips
}

fn is_closed(sigil: &[u8]) -> bool {
    sigil[0] == sigil[sigil.len() - 1]
}

#[test]
fn generated_sigils_are_valid() {
    let mut visited = 0usize;
    for_each_sigil(EXPLORE_LEN, &mut |sigil: &[u8]| {
        visited += 1;
        let key = canonicalize(sigil).unwrap_or_else(|| panic!("should have been valid: {sigil:?}"));
        assert!(key.looks_canonical(), "{sigil:?} -> {key}");
        assert_eq!(canonicalize(key.as_bytes()).as_ref(), Some(&key), "{sigil:?}");
    });
    assert!(visited > 0);
}

#[test]
fn generated_open_sigils_match_their_reverse() {
    for_each_sigil(EXPLORE_LEN, &mut |sigil: &[u8]| {
        if is_closed(sigil) {
            return;
        }
        let mut reversed = sigil.to_vec();
        reversed.reverse();
        assert_eq!(canonicalize(sigil), canonicalize(&reversed), "{sigil:?}");
    });
}

#[test]
fn generated_sub_loop_flips_are_equivalent() {
    for_each_sigil(EXPLORE_LEN + 1, &mut |sigil: &[u8]| {
        let key = canonicalize(sigil);
        for flipped in sub_loop_flips(sigil) {
            assert_eq!(canonicalize(&flipped), key, "{sigil:?} vs {flipped:?}");
        }
    });
}

/// Longest closed walk explored exhaustively, including walks that cross
/// themselves.
const LOOP_EXPLORE_LEN: usize = 9;

#[test]
fn generated_closed_walks_are_rotation_and_direction_invariant() {
    let mut loops = 0usize;
    for_each_sigil(LOOP_EXPLORE_LEN, &mut |sigil: &[u8]| {
        if !is_closed(sigil) {
            return;
        }
        loops += 1;
        let expected = canonicalize(sigil).expect("closed walk should be valid");
        for variant in loop_variants(sigil) {
            assert_eq!(
                canonicalize(&variant).as_ref(),
                Some(&expected),
                "{sigil:?} vs {variant:?}"
            );
        }
    });
    assert!(loops > 0);
}
