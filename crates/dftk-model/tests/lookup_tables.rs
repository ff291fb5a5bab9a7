//! Lookup tables parsed from study `lib/` files.

use dftk_model::maps::{OTHER_DOMAIN, UNKNOWN};
use dftk_model::{Centers, Countries, DomainMap, MissingMap, PageMap, VisitMap};

const VISIT_MAP: &str = "\
0|B|Baseline|1|8|0|0|1-3|4||||
1-10|S|Follow-up %S (week %{S.2})|5|6|7|3|5 6|7|||7 5 6
99|C|cycle|||||1||||
20-30|T|Termination|5|6|0|0|9||1||
";

#[test]
fn visit_map_labels_and_plate_order() {
    let mut map = VisitMap::default();
    assert_eq!(map.load(VISIT_MAP), 3);
    assert_eq!(map.label(0), "Baseline");
    assert_eq!(map.label(7), "Follow-up 7 (week 07)");
    assert_eq!(map.label(99), "Visit 99");
    assert_eq!(map.label(500), "Visit 500");

    let baseline = map.entry(0).expect("baseline");
    assert!(baseline.is_required(2));
    assert!(!baseline.is_required(4));
    assert_eq!(baseline.plate_order(4), 1);

    let follow_up = map.entry(3).expect("follow-up");
    assert_eq!(follow_up.plate_order(7), 0);
    assert_eq!(follow_up.plate_order(6), 2);
    assert_eq!(follow_up.due_day, 7);
    assert_eq!(follow_up.overdue_allowance, 3);

    let termination = map.entry(25).expect("termination");
    assert_eq!(termination.missed_visit_notification, Some(1));
    assert_eq!(termination.date_plate, Some(5));
}

#[test]
fn page_map_first_match_wins() {
    let mut map = PageMap::default();
    let text = "S|1|skipped\n5|1-4|Page %{P.2} of visit %S\n5|*|Generic %P\n";
    assert_eq!(map.load(text), 2);
    assert_eq!(map.label(2, 5).as_deref(), Some("Page 05 of visit 2"));
    assert_eq!(map.label(9, 5).as_deref(), Some("Generic 5"));
    assert_eq!(map.label(2, 6), None);
}

#[test]
fn missing_map_default_and_reload() {
    let mut map = MissingMap::default();
    assert_eq!(map.label("*"), Some("Missing Value"));
    map.load(".U|Unknown\n.N|Not done\n");
    assert_eq!(map.label("*"), None);
    assert_eq!(map.label(".N"), Some("Not done"));
}

#[test]
fn domain_and_country_fallbacks() {
    let mut domains = DomainMap::default();
    domains.load("Vitals|3 1 2\n");
    assert_eq!(domains.label(9), OTHER_DOMAIN);
    assert_eq!(domains.entry(1).map(|d| d.plate_order(2)), Some(2));

    let mut countries = Countries::default();
    assert_eq!(countries.load("Canada|North America|1-10\nFrance|Europe|11 12\n"), 2);
    assert_eq!(countries.country(12), "France");
    assert_eq!(countries.region(3), "North America");
    assert_eq!(countries.country(99), UNKNOWN);
    assert_eq!(countries.region(99), UNKNOWN);
}

#[test]
fn unclaimed_patients_go_to_the_error_monitor() {
    let mut centers = Centers::default();
    let text = "\
1|a|b|c|d|e|f|g|h|i|ERROR MONITOR
2|a|b|c|d|e|f|g|h|i|100 199
3|a|b|c|d|e|f|g|h|i|200 299|400 499
";
    assert_eq!(centers.load(text), 3);
    assert_eq!(centers.center_number(150), 2);
    assert_eq!(centers.center_number(450), 3);
    assert_eq!(centers.center_number(350), 1);
    assert!(centers.by_number(1).expect("monitor").is_error_monitor);
}

#[test]
fn no_error_monitor_means_no_center() {
    let mut centers = Centers::default();
    centers.load("2|a|b|c|d|e|f|g|h|i|100 199\n");
    assert!(centers.center(5).is_none());
    assert_eq!(centers.center_number(5), 0);
}
