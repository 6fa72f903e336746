//! Two-variant dispatch over independent alternative lists.

use halo_variant::*;

type A = Variant<alternatives![i32, String]>;
type B = Variant<alternatives![bool, String]>;

#[derive(Debug, PartialEq)]
enum Call {
    IntBool(i32, bool),
    IntText(i32, String),
    TextBool(String, bool),
    TextText(String, String),
}

struct Record;

impl Visitor for Record {
    type Output = Call;
}

impl VisitPair<i32, bool> for Record {
    fn visit_pair(&mut self, left: &i32, right: &bool) -> Call {
        Call::IntBool(*left, *right)
    }
}

impl VisitPair<i32, String> for Record {
    fn visit_pair(&mut self, left: &i32, right: &String) -> Call {
        Call::IntText(*left, right.clone())
    }
}

impl VisitPair<String, bool> for Record {
    fn visit_pair(&mut self, left: &String, right: &bool) -> Call {
        Call::TextBool(left.clone(), *right)
    }
}

impl VisitPair<String, String> for Record {
    fn visit_pair(&mut self, left: &String, right: &String) -> Call {
        Call::TextText(left.clone(), right.clone())
    }
}

#[test]
fn test_int_text_overload_selected() {
    let a = A::new(5i32);
    let b = B::new(String::from("x"));
    assert_eq!(apply_pair(Record, &a, &b), Call::IntText(5, String::from("x")));
}

#[test]
fn test_all_four_combinations() {
    let ints = A::new(1i32);
    let texts = A::new(String::from("l"));
    let bools = B::new(true);
    let rtexts = B::new(String::from("r"));

    assert_eq!(apply_pair(Record, &ints, &bools), Call::IntBool(1, true));
    assert_eq!(
        apply_pair(Record, &ints, &rtexts),
        Call::IntText(1, String::from("r"))
    );
    assert_eq!(
        apply_pair(Record, &texts, &bools),
        Call::TextBool(String::from("l"), true)
    );
    assert_eq!(
        apply_pair(Record, &texts, &rtexts),
        Call::TextText(String::from("l"), String::from("r"))
    );
}

#[test]
fn test_same_variant_on_both_sides() {
    let a = A::new(String::from("same"));
    assert_eq!(
        apply_pair(Record, &a, &B::new(false)),
        Call::TextBool(String::from("same"), false)
    );
}

/// Moves text from the right variant into the left one.
struct Transfer;

impl Visitor for Transfer {
    type Output = bool;
}

impl VisitPairMut<i32, bool> for Transfer {
    fn visit_pair_mut(&mut self, _: &mut i32, _: &mut bool) -> bool {
        false
    }
}

impl VisitPairMut<i32, String> for Transfer {
    fn visit_pair_mut(&mut self, left: &mut i32, right: &mut String) -> bool {
        *left += i32::try_from(right.len()).unwrap_or(i32::MAX);
        right.clear();
        true
    }
}

impl VisitPairMut<String, bool> for Transfer {
    fn visit_pair_mut(&mut self, _: &mut String, _: &mut bool) -> bool {
        false
    }
}

impl VisitPairMut<String, String> for Transfer {
    fn visit_pair_mut(&mut self, left: &mut String, right: &mut String) -> bool {
        left.push_str(&std::mem::take(right));
        true
    }
}

#[test]
fn test_apply_pair_mut_edits_both_sides() {
    let mut a = A::new(String::from("ab"));
    let mut b = B::new(String::from("cd"));
    assert!(apply_pair_mut(Transfer, &mut a, &mut b));
    assert_eq!(a.get::<String, _>().unwrap(), "abcd");
    assert_eq!(b.get::<String, _>().unwrap(), "");

    let mut n = A::new(10i32);
    let mut t = B::new(String::from("xyz"));
    assert!(apply_pair_mut(Transfer, &mut n, &mut t));
    assert_eq!(n.get::<i32, _>(), Ok(&13));

    let mut flag = B::new(true);
    assert!(!apply_pair_mut(Transfer, &mut n, &mut flag));
    assert_eq!(flag.get::<bool, _>(), Ok(&true));
}

/// Reports the pair of positions it was called with.
struct Positions;

impl Visitor for Positions {
    type Output = (usize, usize);
}

macro_rules! positions {
    (@row $l:ty => $li:literal ; [$($r:ty => $ri:literal),*]) => {
        $(impl VisitPair<$l, $r> for Positions {
            fn visit_pair(&mut self, _: &$l, _: &$r) -> (usize, usize) {
                ($li, $ri)
            }
        })*
    };
    ($($l:ty => $li:literal),* ; $rs:tt) => {
        $(positions!(@row $l => $li ; $rs);)*
    };
}

positions!(u8 => 0, u16 => 1, u32 => 2, u64 => 3 ; [char => 0, f32 => 1, f64 => 2, () => 3, i8 => 4]);

#[test]
fn test_cross_product_reaches_every_cell() {
    type Left = Variant<alternatives![u8, u16, u32, u64]>;
    type Right = Variant<alternatives![char, f32, f64, (), i8]>;

    let lefts = [Left::new(0u8), Left::new(0u16), Left::new(0u32), Left::new(0u64)];
    let rights = [
        Right::new('a'),
        Right::new(0f32),
        Right::new(0f64),
        Right::new(()),
        Right::new(0i8),
    ];

    for l in &lefts {
        for r in &rights {
            assert_eq!(apply_pair(Positions, l, r), (l.which(), r.which()));
        }
    }
}
