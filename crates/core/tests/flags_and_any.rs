//! Flag claims and the `any` fallback chain.

mod common;

use cli_reap_core::{BareOption, Claim, Environment, ReapOptions, Reaped, Reaper};
use common::{strict, strict_node};

#[test]
fn flag_is_true_once() {
    let mut r = strict_node(&["--flag"]);
    assert!(r.flag("flag"));
    assert!(!r.flag("flag"));
}

#[test]
fn any_key_in_list_finds_flag() {
    assert!(strict_node(&["--flag"]).any(["f", "flag"]).is_present());
    assert!(strict_node(&["--flag"]).any(["flag", "f"]).is_present());
    assert!(!strict_node(&["--flag"]).any(["a", "f"]).is_present());
}

#[test]
fn single_and_double_dash_flags() {
    assert!(strict_node(&["--flag"]).any("flag").is_present());
    assert!(strict_node(&["-flag"]).any("flag").is_present());
    assert!(strict_node(&["--flag=value"]).any("flag").is_present());
    assert!(strict_node(&["--flag", "value"]).any("flag").is_present());
    assert!(strict_node(&["-flag=value"]).any("flag").is_present());
    assert!(strict_node(&["-flag", "value"]).any("flag").is_present());
}

#[test]
fn absent_flags() {
    assert!(!strict_node(&["--other-flag"]).any("flag").is_present());
    assert!(!strict(&[]).any("flag").is_present());
    assert_eq!(strict(&[]).any("flag"), Reaped::NotFound);
}

#[test]
fn strict_case_sensitivity() {
    assert_eq!(strict_node(&["--FLAG"]).any("flag"), Reaped::NotFound);
    assert_eq!(strict_node(&["--FLAG"]).any("FLAG"), Reaped::Flag);
    assert_eq!(strict_node(&["-FLAG"]).any("flag"), Reaped::NotFound);
    assert_eq!(strict_node(&["-FLAG"]).any("FLAG"), Reaped::Flag);
    assert_eq!(strict_node(&["--FLAG=value"]).any("flag"), Reaped::NotFound);
    assert_eq!(strict_node(&["--FLAG=value"]).any("FLAG"), Reaped::Found("value".into()));
}

#[test]
fn flag_at_the_very_start() {
    assert!(strict(&["--flag", "node", "script.js"]).any("flag").is_present());
    assert!(strict(&["-flag", "node", "script.js"]).any("flag").is_present());
    assert_eq!(
        strict(&["--flag", "value", "node", "script.js"]).any("flag"),
        Reaped::Found("value".into())
    );
}

#[test]
fn any_returns_value_or_flag() {
    assert_eq!(strict_node(&["--flag"]).any("flag"), Reaped::Flag);
    assert_eq!(strict_node(&["--flag=value"]).any("flag"), Reaped::Found("value".into()));
    assert_eq!(strict_node(&["--flag", "value"]).any("flag"), Reaped::Found("value".into()));
    assert_eq!(strict_node(&["--other-flag"]).any("flag"), Reaped::NotFound);
}

#[test]
fn any_normalizes_quotes() {
    assert_eq!(
        strict_node(&["--flag=\"quoted value\""]).any("flag"),
        Reaped::Found("quoted value".into())
    );
    assert_eq!(
        strict_node(&["--flag", "'quoted value'"]).any("flag"),
        Reaped::Found("quoted value".into())
    );
}

#[test]
fn empty_quoted_values_are_found() {
    assert_eq!(strict_node(&["--flag=''"]).any("flag"), Reaped::Found(String::new()));
    assert_eq!(strict_node(&["--flag=\"\""]).any("flag"), Reaped::Found(String::new()));
    assert_eq!(strict(&["--flag=''", "node", "script.js"]).any("flag"), Reaped::Found(String::new()));
    assert_eq!(strict(&["--flag=\"\"", "node", "script.js"]).any("flag"), Reaped::Found(String::new()));
}

#[test]
fn flags_sharing_a_prefix() {
    assert_eq!(strict_node(&["--flag-o", "--flag"]).any("flag"), Reaped::Flag);
    assert_eq!(strict_node(&["--flag", "--flag-o"]).any("flag"), Reaped::Flag);
    assert_eq!(strict_node(&["--flag=yes", "--flag-o"]).any("flag"), Reaped::Found("yes".into()));
    assert_eq!(strict_node(&["--flag-o", "--flag=yes"]).any("flag"), Reaped::Found("yes".into()));
}

#[test]
fn any_consumes_like_opt_and_flag() {
    let mut r = strict_node(&["--flag", "value", "pos"]);
    assert_eq!(r.any("flag"), Reaped::Found("value".into()));
    assert_eq!(r.cur(), ["pos"]);

    let mut r = strict_node(&["--flag", "--next"]);
    assert_eq!(r.any("flag"), Reaped::Flag);
    assert_eq!(r.cur(), ["--next"]);
}

#[test]
fn any_falls_back_to_environment_then_default() {
    let env = Environment::from_primary([("MY_KEY", "v")]);
    assert_eq!(Reaper::strict(Vec::<String>::new(), env.clone()).any("MY_KEY"), Reaped::Env("v".into()));
    assert_eq!(
        Reaper::strict(Vec::<String>::new(), env.clone()).any_or("OTHER", "d"),
        Reaped::Default("d".into())
    );
    assert_eq!(
        Reaper::strict(["./bin", "--MY_KEY=argv"], env).any_or("MY_KEY", "d"),
        Reaped::Found("argv".into())
    );
}

#[test]
fn empty_default_is_still_a_default() {
    assert_eq!(strict(&[]).any_or("x", ""), Reaped::Default(String::new()));
}

#[test]
fn bare_option_policy_is_configurable() {
    let tokens = ["./bin", "--out", "-v"];

    let mut skip = Reaper::with_options(tokens, Environment::new(), ReapOptions::strict());
    assert_eq!(skip.claim("out", Claim::Value), Reaped::NotFound);
    assert_eq!(skip.cur(), ["--out", "-v"]);

    let presence = ReapOptions::strict().with_bare_option(BareOption::Presence);
    let mut pres = Reaper::with_options(tokens, Environment::new(), presence.clone());
    assert_eq!(pres.claim("out", Claim::Value), Reaped::Flag);
    assert_eq!(pres.cur(), ["-v"]);

    let mut pres = Reaper::with_options(tokens, Environment::new(), presence);
    assert_eq!(pres.opt("out"), None);
    assert!(!pres.flag("out"));
}

#[test]
fn has_peeks_without_claiming() {
    let mut r = strict_node(&["--verbose", "--out=x"]);
    assert!(r.has("verbose"));
    assert!(r.has("out"));
    assert!(!r.has("verb"));
    assert!(r.flag("verbose"));
    assert!(!r.has("verbose"));
    assert_eq!(r.cur(), ["--out=x"]);
}
