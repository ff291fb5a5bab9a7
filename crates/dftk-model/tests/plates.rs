//! Plate field ordering and value decoding.

use dftk_model::{Code, FieldAttributes, FieldRef, FieldType, ModuleRef, Plate, Rect};

fn field(id: i64, number: i64, name: &str) -> FieldRef {
    FieldRef::new(
        id,
        FieldAttributes {
            number,
            name: Some(name.to_string()),
            ..FieldAttributes::default()
        },
    )
}

fn names(plate: &Plate) -> Vec<String> {
    plate
        .field_list()
        .iter()
        .filter_map(|f| f.attrs.name.clone())
        .collect()
}

#[test]
fn field_list_merges_module_refs_by_number() {
    let mut plate = Plate::new(12);
    plate.add_module_ref(ModuleRef::new(1, 10));
    plate.add_module_ref(ModuleRef::new(2, 20));
    plate.add_field_ref(1, field(100, 8, "visit_date")).expect("add");
    plate.add_field_ref(2, field(200, 9, "weight")).expect("add");
    plate.add_field_ref(1, field(101, 10, "height")).expect("add");
    assert_eq!(names(&plate), ["visit_date", "weight", "height"]);
    assert_eq!(plate.field_at(2).map(|f| f.module_id), Some(20));
}

#[test]
fn cached_list_is_rebuilt_after_changes() {
    let mut plate = Plate::new(1);
    plate.add_module_ref(ModuleRef::new(1, 1));
    plate.add_field_ref(1, field(1, 20, "late")).expect("add");
    assert_eq!(names(&plate), ["late"]);

    plate.add_module_ref(ModuleRef::new(2, 2));
    plate.add_field_ref(2, field(2, 5, "early")).expect("add");
    assert_eq!(names(&plate), ["early", "late"]);
    assert_eq!(plate.field_at(1).map(|f| f.id), Some(2));
}

#[test]
fn visual_fields_skip_fields_without_boxes() {
    let mut plate = Plate::new(3);
    plate.add_module_ref(ModuleRef::new(1, 1));
    let mut drawn = field(1, 1, "drawn");
    drawn.attrs.set_rects(&[Rect::new(10, 10, 20, 20)]);
    plate.add_field_ref(1, drawn).expect("add");
    plate.add_field_ref(1, field(2, 2, "hidden")).expect("add");
    let visual: Vec<i64> = plate.visual_fields().map(|f| f.id).collect();
    assert_eq!(visual, [1]);
}

#[test]
fn decode_compares_codes_as_text() {
    let attrs = FieldAttributes {
        field_type: Some(FieldType::Choice),
        codes: vec![Code::new("1", "Yes"), Code::new("2", "No")],
        ..FieldAttributes::default()
    };
    let hit = attrs.decode("2");
    assert_eq!(hit.box_index, Some(1));
    assert_eq!(hit.text, "No");

    let first = attrs.decode("1");
    assert_eq!(first.box_index, Some(0));
    assert_eq!(first.text, "Yes");

    let miss = attrs.decode("9");
    assert_eq!(miss.box_index, None);
    assert_eq!(miss.text, "9");

    let padded = attrs.decode("01");
    assert_eq!(padded.box_index, None);
    assert_eq!(padded.text, "01");
}

#[test]
fn decode_leaves_uncoded_fields_alone() {
    let attrs = FieldAttributes {
        field_type: Some(FieldType::Number),
        codes: vec![Code::new("1", "One")],
        ..FieldAttributes::default()
    };
    assert_eq!(attrs.decode("1").text, "1");
    assert_eq!(attrs.decode("1").box_index, None);
}

#[test]
fn alias_placeholders() {
    let attrs = FieldAttributes {
        number: 14,
        alias: Some("P$(plate)_R$(rplate)_F$(field)".to_string()),
        ..FieldAttributes::default()
    };
    assert_eq!(attrs.expanded_alias(7).as_deref(), Some("P007_R7_F14"));
    assert_eq!(FieldAttributes::default().expanded_alias(7), None);
}
