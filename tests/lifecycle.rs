//! Drop-ordering tests backed by `motley-test-util`'s instrumented values.

use motley::{case, overload, Variant};
use test_util::{DropLog, Tracked};

#[test]
fn replacing_destroys_the_old_alternative_first() {
    let log = DropLog::new();
    let mut var: Variant<(Tracked, u8)> = Variant::new();

    var.set(Tracked::new("a", &log));
    assert_eq!(log.take(), ["create a"]);

    // The replacement value exists before `set` runs; the observable
    // requirement is that "a" leaves the storage during the replacement,
    // before "b" occupies it, and that "a" is never dropped again.
    var.set(Tracked::new("b", &log));
    assert_eq!(log.take(), ["create b", "drop a"]);

    var.set(9u8);
    assert_eq!(log.take(), ["drop b"]);
}

#[test]
fn dropping_the_variant_destroys_the_live_alternative() {
    let log = DropLog::new();

    {
        let mut var: Variant<(u8, Tracked)> = Variant::new();
        var.set(Tracked::new("live", &log));
        log.take();
    }

    assert_eq!(log.take(), ["drop live"]);
}

#[test]
fn dropping_an_empty_variant_does_nothing() {
    let log = DropLog::new();

    {
        let mut var: Variant<(Tracked, u8)> = Variant::new();
        drop(var);

        var = Variant::new();
        var.set(Tracked::new("cleared", &log));
        var.clear();
        assert!(var.is_empty());
    }

    assert_eq!(log.take(), ["create cleared", "drop cleared"]);
}

#[test]
fn take_transfers_ownership_instead_of_dropping() {
    let log = DropLog::new();
    let mut var: Variant<(Tracked, u8)> = Variant::new();

    var.set(Tracked::new("moved", &log));
    let taken = var.take::<Tracked, _>().unwrap();
    assert!(var.is_empty());
    assert_eq!(log.take(), ["create moved"]);

    drop(taken);
    assert_eq!(log.take(), ["drop moved"]);
}

#[test]
fn visiting_does_not_disturb_the_lifecycle() {
    let log = DropLog::new();
    let mut var: Variant<(Tracked, u8)> = Variant::new();

    var.set(Tracked::new("seen", &log));
    log.take();

    let mut cases = overload((
        case(|t: &Tracked| t.label().len()),
        case(|b: &u8| usize::from(*b)),
    ));
    assert_eq!(var.visit(&mut cases), Ok(4));

    // Visitation borrows the alternative in place; nothing is cloned or
    // dropped by the dispatch itself.
    assert_eq!(log.take(), Vec::<String>::new());
}
