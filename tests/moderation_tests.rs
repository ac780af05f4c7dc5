use oai_payloads::moderation::{ModerationCategory, ModerationReport};
use oai_payloads::PayloadError;
use serde_json::{json, Map, Value};

const WIRE_KEYS: [&str; 11] = [
    "hate",
    "hate/threatening",
    "harassment",
    "harassment/threatening",
    "self-harm",
    "self-harm/intent",
    "self-harm/instructions",
    "sexual",
    "sexual/minors",
    "violence",
    "violence/graphic",
];

fn categories(flagged: &[&str]) -> Value {
    let mut obj = Map::new();
    for key in WIRE_KEYS {
        obj.insert(key.to_string(), json!(flagged.contains(&key)));
    }
    Value::Object(obj)
}

fn scores(base: f64) -> Value {
    let mut obj = Map::new();
    for (i, key) in WIRE_KEYS.iter().enumerate() {
        obj.insert(key.to_string(), json!(base + i as f64 / 100.0));
    }
    Value::Object(obj)
}

fn result(flagged: bool, flagged_keys: &[&str]) -> Value {
    json!({
        "flagged": flagged,
        "categories": categories(flagged_keys),
        "category_scores": scores(0.001),
    })
}

fn report(results: Vec<Value>) -> Value {
    json!({
        "id": "modr-XXXXX",
        "model": "text-moderation-007",
        "results": results,
    })
}

#[test]
fn empty_results_are_not_flagged() {
    let r = ModerationReport::from_value(report(vec![])).unwrap();
    assert!(r.results.is_empty());
    assert!(!r.is_flagged());
    assert_eq!(r.flagged_results().count(), 0);
}

#[test]
fn any_flagged_result_flags_the_report() {
    let doc = report(vec![
        result(false, &[]),
        result(true, &["violence", "violence/graphic"]),
    ]);
    let r = ModerationReport::from_json(&doc.to_string()).unwrap();
    assert_eq!(r.id, "modr-XXXXX");
    assert_eq!(r.model, "text-moderation-007");
    assert!(r.is_flagged());

    let flagged: Vec<usize> = r.flagged_results().map(|(i, _)| i).collect();
    assert_eq!(flagged, vec![1]);
    assert_eq!(
        r.results[1].flagged_categories(),
        vec![ModerationCategory::Violence, ModerationCategory::ViolenceGraphic]
    );
}

#[test]
fn all_unflagged_results_do_not_flag_the_report() {
    let doc = report(vec![result(false, &[]), result(false, &[])]);
    let r = ModerationReport::from_slice(doc.to_string().as_bytes()).unwrap();
    assert!(!r.is_flagged());
}

#[test]
fn missing_category_scores_is_a_schema_mismatch() {
    let doc = report(vec![json!({
        "flagged": false,
        "categories": categories(&[]),
    })]);
    let err = ModerationReport::from_value(doc).unwrap_err();
    assert!(matches!(
        err,
        PayloadError::SchemaMismatch { payload: "moderation report", .. }
    ));
    assert!(err.to_string().contains("category_scores"));
}

#[test]
fn string_boolean_is_a_schema_mismatch() {
    let mut cats = categories(&[]);
    cats["hate"] = json!("true");
    let doc = report(vec![json!({
        "flagged": true,
        "categories": cats,
        "category_scores": scores(0.5),
    })]);
    let err = ModerationReport::from_json(&doc.to_string()).unwrap_err();
    assert!(err.is_schema_mismatch());
}

#[test]
fn non_list_results_is_a_schema_mismatch() {
    let doc = json!({"id": "modr-1", "model": "m", "results": result(false, &[])});
    assert!(ModerationReport::from_value(doc).unwrap_err().is_schema_mismatch());
}

#[test]
fn missing_single_category_key_is_a_schema_mismatch() {
    let mut scores_val = scores(0.1);
    scores_val.as_object_mut().unwrap().remove("self-harm/intent");
    let doc = report(vec![json!({
        "flagged": false,
        "categories": categories(&[]),
        "category_scores": scores_val,
    })]);
    let err = ModerationReport::from_value(doc).unwrap_err();
    assert!(err.to_string().contains("self-harm/intent"));
}

#[test]
fn every_category_key_round_trips_exactly() {
    let table: Vec<&str> = ModerationCategory::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(table, WIRE_KEYS);

    let doc = report(vec![result(true, &WIRE_KEYS)]);
    let r = ModerationReport::from_value(doc).unwrap();
    let encoded = serde_json::to_value(&r).unwrap();
    let cats = encoded["results"][0]["categories"].as_object().unwrap();
    let scores_obj = encoded["results"][0]["category_scores"].as_object().unwrap();
    assert_eq!(cats.len(), 11);
    assert_eq!(scores_obj.len(), 11);

    for (i, category) in ModerationCategory::ALL.iter().enumerate() {
        let key = WIRE_KEYS[i];
        assert_eq!(category.to_string(), key);
        assert_eq!(key.parse::<ModerationCategory>().unwrap(), *category);
        assert_eq!(cats[key], json!(true), "flag key {key}");
        assert!(scores_obj.contains_key(key), "score key {key}");

        let expected = 0.001 + i as f64 / 100.0;
        assert_eq!(*r.results[0].category_scores.get(*category), expected);
        assert!(*r.results[0].categories.get(*category));
    }
}

#[test]
fn scores_and_flags_describe_the_same_categories() {
    let r = ModerationReport::from_value(report(vec![result(true, &["sexual/minors"])])).unwrap();
    let res = &r.results[0];
    let flag_keys: Vec<ModerationCategory> = res.categories.iter().map(|(c, _)| c).collect();
    let score_keys: Vec<ModerationCategory> =
        res.category_scores.iter().map(|(c, _)| c).collect();
    assert_eq!(flag_keys, score_keys);
    assert_eq!(res.flagged_categories(), vec![ModerationCategory::SexualMinors]);
    // Scores rise with table position in the fixture.
    assert_eq!(res.top_category().0, ModerationCategory::ViolenceGraphic);
}

#[test]
fn unknown_extra_keys_are_ignored() {
    let mut doc = report(vec![result(false, &[])]);
    doc["object"] = json!("moderation");
    doc["results"][0]["category_applied_input_types"] = json!({"hate": ["text"]});
    let r = ModerationReport::from_value(doc).unwrap();
    assert_eq!(r.results.len(), 1);
}
