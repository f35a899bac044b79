mod common;

use common::{ElementSpec, FakeDriver};
use minerva_client::course;

const INDEX: &str = "https://minerva.ugent.be/index.php";

#[test]
fn enumeration_collapses_duplicate_listings() {
    let analyse = "https://minerva.ugent.be/course_home/course_home.php?cidReq=E123456";
    let fysica = "https://minerva.ugent.be/course_home/course_home.php?cidReq=E777001";

    let mut driver = FakeDriver::new();
    // The index lists each course in several widgets (recent activity,
    // my courses, ..); the same address shows up more than once.
    driver.page(
        INDEX,
        vec![
            ElementSpec::link(analyse, "Analyse I"),
            ElementSpec::link(fysica, "Fysica"),
            ElementSpec::link(analyse, "Analyse I (recent)"),
            ElementSpec::link("https://minerva.ugent.be/calendar/agenda.php", "Agenda"),
            ElementSpec::link(
                "https://minerva.ugent.be/course_home/course_home.php?cidReq=",
                "broken",
            ),
            ElementSpec::heading("Mijn cursussen"),
        ],
    );

    let courses = course::enumerate(&mut driver).unwrap();

    let ids: Vec<&str> = courses.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["E123456", "E777001"]);
}

#[test]
fn empty_index_yields_empty_set() {
    let mut driver = FakeDriver::new();
    driver.page(INDEX, vec![ElementSpec::heading("Mijn cursussen")]);

    let courses = course::enumerate(&mut driver).unwrap();
    assert!(courses.is_empty());
}
