use async_graphql::SimpleObject;

/// A school-wide announcement shown on the announcements tab.
#[derive(SimpleObject, Clone, Debug)]
pub struct Announcement {
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub category: String,
}

impl Announcement {
    fn new(name: &str, date: &str, time: &str, description: &str, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            date: date.to_owned(),
            time: time.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
        }
    }
}

/// The feed is maintained in code for now; there is no announcements sheet
/// yet. TODO: move these rows into a sheet once the coordinators set one up.
pub fn all() -> Vec<Announcement> {
    vec![
        Announcement::new(
            "Talk about SIP",
            "2025-06-18",
            "14:00",
            "An introduction to student-initiated projects",
            "Community",
        ),
        Announcement::new(
            "Timetable planning",
            "2025-07-05",
            "14:00",
            "Learn how to plan your own timetable",
            "Education",
        ),
        Announcement::new(
            "Launch your own student-initiated learning",
            "2025-07-12",
            "16:00",
            "How to start and run your own SIP project",
            "Education",
        ),
    ]
}
