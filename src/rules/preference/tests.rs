use crate::rules::preference::{
    ChangePreference, ChangePreferenceExecutor, ChangePreferenceParser, DeletePreference, DeletePreferenceExecutor,
    DeletePreferenceParser, PreferenceCommand, PreferenceValue,
};
use crate::{
    Action, Dispatcher, MemoryStore, Module, ParseError, Parser, ParserExt, Store, StoreValue, StringAction,
    UrlComponents, UrlComponentsParser,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use url::Url;

fn string_action(raw: &str) -> StringAction {
    let components = UrlComponents::parse(raw).unwrap();
    UrlComponentsParser.parse(&components).unwrap()
}

fn parse<P: Parser<StringAction>>(parser: P, raw: &str) -> Result<P::Output, ParseError> {
    parser.parse(&string_action(raw))
}

#[test]
fn delete_parses_key() {
    assert_eq!(parse(DeletePreferenceParser, "app://preference/name/delete").unwrap(), DeletePreference::new("name"));
}

#[test]
fn delete_ignores_trailing_segments() {
    assert_eq!(
        parse(DeletePreferenceParser, "app://preference/age/delete/--it-is-irrelevant/what/comes/after").unwrap(),
        DeletePreference::new("age")
    );
}

#[test]
fn delete_folds_key_and_verb() {
    assert_eq!(parse(DeletePreferenceParser, "app://PREFERENCE/Name/DELETE").unwrap(), DeletePreference::new("name"));
}

#[test]
fn delete_rejects_other_shapes() {
    for raw in ["app://preference/name", "app://preference/name/set/x", "app://other/name/delete", "app://preference"] {
        assert!(parse(DeletePreferenceParser, raw).unwrap_err().is_failed(), "{raw}");
    }
}

#[test]
fn change_keeps_value_case() {
    let action = parse(ChangePreferenceParser::<String>::new(), "app://preference/NAME/SET/Peter").unwrap();
    assert_eq!(action, ChangePreference::new("name", "Peter".to_string()));
    assert_eq!(action.module_subject_verb(), (&Module::preference(), "name".to_string(), PreferenceCommand::Set));
}

#[test]
fn change_value_type_decides_match() {
    let raw = "app://preference/age/set/123";
    assert_eq!(parse(ChangePreferenceParser::<i64>::new(), raw).unwrap().value, 123);
    assert!(parse(ChangePreferenceParser::<bool>::new(), raw).unwrap_err().is_failed());

    let raw = "app://preference/active/set/true";
    assert!(parse(ChangePreferenceParser::<i64>::new(), raw).unwrap_err().is_failed());
    assert!(parse(ChangePreferenceParser::<bool>::new(), raw).unwrap().value);
}

#[test]
fn change_requires_an_object() {
    assert!(parse(ChangePreferenceParser::<String>::new(), "app://preference/name/set").unwrap_err().is_failed());
}

#[test]
fn change_optional_value_always_matches() {
    let action = parse(ChangePreferenceParser::<Option<i64>>::new(), "app://preference/age/set/old").unwrap();
    assert_eq!(action.value, None);
}

#[test]
fn change_url_value_is_percent_decoded() {
    let action =
        parse(ChangePreferenceParser::<Url>::new(), "app://preference/homepage/set/https:%2F%2Fexample.com").unwrap();
    assert_eq!(action.value.as_str(), "https://example.com/");
}

#[test]
fn parsers_chain_from_components() {
    let parser = UrlComponentsParser.flat_map(DeletePreferenceParser);
    let components = UrlComponents::parse("example://preference/token/delete").unwrap();
    assert_eq!(parser.parse(&components).unwrap().key, "token");
}

#[test]
fn executors_apply_to_store() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Dispatcher::new()
        .with(DeletePreferenceExecutor::new(store.clone()))
        .with(ChangePreferenceExecutor::<i64>::new(store.clone()));

    dispatcher.dispatch(&ChangePreference::new("age", 66_i64)).unwrap();
    assert_eq!(i64::load(store.as_ref(), "age").unwrap(), Some(66));

    dispatcher.dispatch(&DeletePreference::new("age")).unwrap();
    assert_eq!(store.get("age").unwrap(), None);
}

#[test]
fn executor_value_type_must_match_exactly() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Dispatcher::new().with(ChangePreferenceExecutor::<i64>::new(store.clone()));

    let error = dispatcher.dispatch(&ChangePreference::new("age", 66_i32)).unwrap_err();
    assert!(error.is_unhandled());
    assert!(store.is_empty());
}

#[test]
fn optional_none_executes_without_writing() {
    let store = Arc::new(MemoryStore::new());
    store.set("age", StoreValue::I64(1)).unwrap();
    let dispatcher = Dispatcher::new().with(ChangePreferenceExecutor::<Option<i64>>::new(store.clone()));

    dispatcher.dispatch(&ChangePreference::new("age", None::<i64>)).unwrap();
    assert_eq!(store.get("age").unwrap(), Some(StoreValue::I64(1)));
}

#[test]
fn rule_order_decides_winner() {
    let action = string_action("app://preference/age/set/123");

    let integer_first =
        one_of!(ChangePreferenceParser::<i64>::new().erase(), ChangePreferenceParser::<String>::new().erase());
    let string_first =
        one_of!(ChangePreferenceParser::<String>::new().erase(), ChangePreferenceParser::<i64>::new().erase());

    let winner = integer_first.parse(&action).unwrap();
    assert_eq!(winner.downcast_ref::<ChangePreference<i64>>(), Some(&ChangePreference::new("age", 123)));
    assert!(!winner.is::<ChangePreference<String>>());

    let winner = string_first.parse(&action).unwrap();
    assert_eq!(
        winner.downcast_ref::<ChangePreference<String>>(),
        Some(&ChangePreference::new("age", "123".to_string()))
    );
    assert!(!winner.is::<ChangePreference<i64>>());
}
