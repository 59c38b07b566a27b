pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::report_builder::*;

pub mod report_builder {

    use super::*;
    use crate::{email::*, geo::*, report::*};
    use time::OffsetDateTime;

    #[derive(Debug)]
    pub struct ReportBuild {
        report: Report,
    }

    impl ReportBuild {
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.report.pos = pos;
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.report.category = category.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.report.description = desc.into();
            self
        }
        pub fn reporter_email(mut self, email: &str) -> Self {
            self.report.reporter_email = EmailAddress::new_unchecked(email.into());
            self
        }
        pub fn location_id(mut self, id: &str) -> Self {
            self.report.location_id = id.into();
            self
        }
        pub fn route_id(mut self, id: Option<&str>) -> Self {
            self.report.route_id = id.map(Into::into);
            self
        }
        pub fn created_at(mut self, at: OffsetDateTime) -> Self {
            self.report.created_at = at;
            self
        }
        pub fn finish(self) -> Report {
            self.report
        }
    }

    impl Builder for Report {
        type Build = ReportBuild;
        fn build() -> Self::Build {
            ReportBuild {
                report: Report {
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    category: String::new(),
                    description: String::new(),
                    photo: String::new(),
                    created_at: OffsetDateTime::UNIX_EPOCH,
                    reporter_email: EmailAddress::new_unchecked("user@example.com".into()),
                    location_id: String::new(),
                    route_id: None,
                },
            }
        }
    }
}
