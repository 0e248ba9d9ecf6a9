use crate::{Role, RoleUpdate, resolve_role_update};

use googletest::prelude::*;

// =========================================================================
// Role authority rule
// =========================================================================

#[test]
fn given_requested_role_when_resolved_then_overwrites() {
    let update = resolve_role_update(Some(Role::Admin));

    assert_that!(update, eq(RoleUpdate::Overwrite(Role::Admin)));
    assert_that!(update.overwrites(), eq(true));
}

#[test]
fn given_no_requested_role_when_resolved_then_keeps_existing() {
    let update = resolve_role_update(None);

    assert_that!(update, eq(RoleUpdate::KeepExisting));
    assert_that!(update.overwrites(), eq(false));
}

#[test]
fn given_no_requested_role_and_existing_admin_when_applied_then_admin_is_kept() {
    let role = resolve_role_update(None).apply(Some(Role::Admin));

    assert_that!(role, eq(Role::Admin));
}

#[test]
fn given_no_requested_role_and_no_record_when_applied_then_default_role() {
    let role = resolve_role_update(None).apply(None);

    assert_that!(role, eq(Role::User));
}

#[test]
fn given_requested_role_and_existing_admin_when_applied_then_requested_wins() {
    let role = resolve_role_update(Some(Role::Seller)).apply(Some(Role::Admin));

    assert_that!(role, eq(Role::Seller));
}

#[test]
fn given_requested_role_when_initial_role_then_requested_role() {
    assert_that!(
        resolve_role_update(Some(Role::Admin)).initial_role(),
        eq(Role::Admin)
    );
    assert_that!(resolve_role_update(None).initial_role(), eq(Role::User));
}

#[test]
fn given_any_combination_when_applied_twice_then_result_is_stable() {
    let requested = [None, Some(Role::User), Some(Role::Seller), Some(Role::Admin)];
    let existing = [None, Some(Role::User), Some(Role::Seller), Some(Role::Admin)];

    for req in requested {
        for prev in existing {
            let update = resolve_role_update(req);
            let once = update.apply(prev);
            let twice = update.apply(Some(once));
            assert_that!(twice, eq(once));
        }
    }
}
