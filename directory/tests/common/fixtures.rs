//! Test fixtures and data for directory tests
//!
//! This module provides consistent school records used across all test suites.

use shared::{Coordinates, CriterionScore, Region, SchoolRecord, SchoolType};

/// Fluent builder for school records with sensible defaults
pub struct RecordBuilder {
    record: SchoolRecord,
}

impl RecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: SchoolRecord {
                id: id.to_string(),
                name: format!("مدرسة {id}"),
                alternate_name: format!("School {id}"),
                address: "شارع المدارس".to_string(),
                city: "نابلس".to_string(),
                region: Region::WestBank,
                directorate: Some("نابلس".to_string()),
                school_type: SchoolType::Basic,
                rating: 3.0,
                votes: 10,
                students_count: 300,
                established_year: 1990,
                subjects: vec!["الرياضيات".to_string()],
                features: vec![],
                coordinates: Coordinates::new(32.22, 35.26),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn alternate_name(mut self, alternate_name: &str) -> Self {
        self.record.alternate_name = alternate_name.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record.address = address.to_string();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.record.city = city.to_string();
        self
    }

    /// Gaza records never carry a directorate
    pub fn gaza(mut self) -> Self {
        self.record.region = Region::Gaza;
        self.record.directorate = None;
        self.record.coordinates = Coordinates::new(31.50, 34.45);
        self
    }

    pub fn directorate(mut self, directorate: &str) -> Self {
        self.record.directorate = Some(directorate.to_string());
        self
    }

    pub fn school_type(mut self, school_type: SchoolType) -> Self {
        self.record.school_type = school_type;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.record.rating = rating;
        self
    }

    pub fn votes(mut self, votes: u32) -> Self {
        self.record.votes = votes;
        self
    }

    pub fn established(mut self, year: u16) -> Self {
        self.record.established_year = year;
        self
    }

    pub fn build(self) -> SchoolRecord {
        self.record
    }
}

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const GAZA: &'static str = "غزة";

    /// Records whose only difference that matters is the rating
    pub fn rated(ratings: &[f64]) -> Vec<SchoolRecord> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| RecordBuilder::new(&format!("r-{i}")).rating(*rating).build())
            .collect()
    }

    /// Mixed catalogue where "غزة" appears in the region, city or address of
    /// exactly three records
    pub fn gaza_catalogue() -> Vec<SchoolRecord> {
        vec![
            RecordBuilder::new("gz-region").gaza().city("خان يونس").address("حي الأمل").build(),
            RecordBuilder::new("wb-plain").city("رام الله").address("شارع الإرسال").build(),
            RecordBuilder::new("gz-city").gaza().city("غزة").address("حي الرمال").build(),
            RecordBuilder::new("wb-address").city("الخليل").address("طريق غزة القديم").build(),
            RecordBuilder::new("wb-other").city("جنين").address("الحي الشرقي").build(),
        ]
    }

    /// Catalogue mixing types and ratings for filter-and-sort checks
    pub fn typed_catalogue() -> Vec<SchoolRecord> {
        vec![
            RecordBuilder::new("s1").school_type(SchoolType::Secondary).rating(4.6).build(),
            RecordBuilder::new("s2").school_type(SchoolType::Secondary).rating(3.9).build(),
            RecordBuilder::new("b1").school_type(SchoolType::Basic).rating(4.8).build(),
            RecordBuilder::new("s3").school_type(SchoolType::Secondary).rating(4.0).build(),
            RecordBuilder::new("k1").school_type(SchoolType::Kindergarten).rating(4.2).build(),
            RecordBuilder::new("s4").school_type(SchoolType::Secondary).rating(4.3).build(),
        ]
    }

    /// Records with repeated ratings, votes and names to exercise sort stability
    pub fn ties() -> Vec<SchoolRecord> {
        vec![
            RecordBuilder::new("t1").name("مدرسة الأمل").rating(4.0).votes(50).build(),
            RecordBuilder::new("t2").name("مدرسة النور").rating(4.5).votes(20).build(),
            RecordBuilder::new("t3").name("مدرسة الأمل").rating(4.0).votes(20).build(),
            RecordBuilder::new("t4").name("مدرسة النور").rating(4.5).votes(50).build(),
            RecordBuilder::new("t5").name("مدرسة إبن سينا").rating(4.0).votes(20).build(),
            RecordBuilder::new("t6").name("مدرسة الأمل").rating(3.5).votes(50).build(),
        ]
    }

    pub fn criteria() -> Vec<CriterionScore> {
        vec![
            CriterionScore::new("جودة التعليم", 90.0).unwrap(),
            CriterionScore::new("المرافق", 64.0).unwrap(),
        ]
    }
}
