//! Seed dataset served by the simulated provider

use shared::{Coordinates, CriterionScore, Region, SchoolRecord, SchoolType, SharedResult};
use std::collections::BTreeMap;

struct SchoolSeed {
    id: &'static str,
    name: &'static str,
    alternate_name: &'static str,
    address: &'static str,
    city: &'static str,
    region: Region,
    directorate: Option<&'static str>,
    school_type: SchoolType,
    rating: f64,
    votes: u32,
    students_count: u32,
    established_year: u16,
    lat: f64,
    lng: f64,
    subjects: &'static [&'static str],
    features: &'static [&'static str],
    /// Teaching quality, staff, facilities, activities
    criteria: [f64; 4],
}

const CRITERIA_LABELS: [&str; 4] = ["جودة التعليم", "الكادر التعليمي", "المرافق", "الأنشطة اللامنهجية"];

const SCIENCE: &[&str] = &["الرياضيات", "الفيزياء", "الكيمياء", "اللغة الإنجليزية"];
const HUMANITIES: &[&str] = &["اللغة العربية", "التاريخ", "الجغرافيا", "التربية الإسلامية"];
const EARLY_YEARS: &[&str] = &["القراءة", "الرسم", "الألعاب التعليمية"];
const TECHNICAL: &[&str] = &["الكهرباء", "النجارة", "تكنولوجيا المعلومات"];

const SEEDS: &[SchoolSeed] = &[
    SchoolSeed {
        id: "gz-001",
        name: "مدرسة الرمال الثانوية للبنين",
        alternate_name: "Al-Rimal Secondary Boys School",
        address: "شارع عمر المختار، حي الرمال",
        city: "غزة",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Secondary,
        rating: 4.6,
        votes: 214,
        students_count: 980,
        established_year: 1958,
        lat: 31.524,
        lng: 34.446,
        subjects: SCIENCE,
        features: &["مختبر علوم", "مكتبة"],
        criteria: [91.0, 88.0, 74.0, 69.0],
    },
    SchoolSeed {
        id: "gz-002",
        name: "مدرسة بشير الريس الثانوية للبنات",
        alternate_name: "Bashir Al-Rayyes Girls Secondary School",
        address: "حي تل الهوى",
        city: "غزة",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Secondary,
        rating: 4.3,
        votes: 167,
        students_count: 1120,
        established_year: 1974,
        lat: 31.507,
        lng: 34.437,
        subjects: HUMANITIES,
        features: &["مكتبة", "قاعة حاسوب"],
        criteria: [86.0, 84.0, 65.0, 72.0],
    },
    SchoolSeed {
        id: "gz-003",
        name: "مدرسة خان يونس الأساسية المشتركة",
        alternate_name: "Khan Younis Co-ed Basic School",
        address: "شارع جمال عبد الناصر",
        city: "خان يونس",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Basic,
        rating: 3.9,
        votes: 88,
        students_count: 640,
        established_year: 1985,
        lat: 31.345,
        lng: 34.303,
        subjects: HUMANITIES,
        features: &["ملعب"],
        criteria: [78.0, 80.0, 58.0, 61.0],
    },
    SchoolSeed {
        id: "gz-004",
        name: "روضة براعم رفح",
        alternate_name: "Rafah Buds Kindergarten",
        address: "حي تل السلطان",
        city: "رفح",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Kindergarten,
        rating: 4.1,
        votes: 42,
        students_count: 120,
        established_year: 2012,
        lat: 31.297,
        lng: 34.243,
        subjects: EARLY_YEARS,
        features: &["ساحة ألعاب"],
        criteria: [82.0, 90.0, 70.0, 85.0],
    },
    SchoolSeed {
        id: "gz-005",
        name: "مدرسة دير البلح الصناعية",
        alternate_name: "Deir al-Balah Industrial School",
        address: "شارع صلاح الدين",
        city: "دير البلح",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Vocational,
        rating: 3.6,
        votes: 57,
        students_count: 410,
        established_year: 1990,
        lat: 31.418,
        lng: 34.351,
        subjects: TECHNICAL,
        features: &["ورش تدريب"],
        criteria: [72.0, 75.0, 62.0, 55.0],
    },
    SchoolSeed {
        id: "gz-006",
        name: "المدرسة الأمريكية الدولية في غزة",
        alternate_name: "American International School in Gaza",
        address: "بيت لاهيا، شمال غزة",
        city: "بيت لاهيا",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::International,
        rating: 4.8,
        votes: 131,
        students_count: 260,
        established_year: 2000,
        lat: 31.556,
        lng: 34.500,
        subjects: SCIENCE,
        features: &["منهاج دولي", "مختبر علوم", "مسبح"],
        criteria: [95.0, 93.0, 90.0, 88.0],
    },
    SchoolSeed {
        id: "gz-007",
        name: "مدرسة جباليا الثانوية للبنات",
        alternate_name: "Jabalia Girls Secondary School",
        address: "مخيم جباليا",
        city: "جباليا",
        region: Region::Gaza,
        directorate: None,
        school_type: SchoolType::Secondary,
        rating: 3.8,
        votes: 96,
        students_count: 870,
        established_year: 1968,
        lat: 31.531,
        lng: 34.483,
        subjects: HUMANITIES,
        features: &["مكتبة"],
        criteria: [80.0, 77.0, 52.0, 60.0],
    },
    SchoolSeed {
        id: "wb-001",
        name: "مدرسة بنات نابلس الثانوية",
        alternate_name: "Nablus Girls Secondary School",
        address: "شارع فيصل",
        city: "نابلس",
        region: Region::WestBank,
        directorate: Some("نابلس"),
        school_type: SchoolType::Secondary,
        rating: 4.4,
        votes: 143,
        students_count: 760,
        established_year: 1962,
        lat: 32.222,
        lng: 35.262,
        subjects: SCIENCE,
        features: &["مختبر علوم", "قاعة حاسوب"],
        criteria: [89.0, 85.0, 76.0, 70.0],
    },
    SchoolSeed {
        id: "wb-002",
        name: "مدرسة الفرندز للبنين",
        alternate_name: "Ramallah Friends Boys School",
        address: "شارع المدارس",
        city: "رام الله",
        region: Region::WestBank,
        directorate: Some("رام الله والبيرة"),
        school_type: SchoolType::International,
        rating: 4.9,
        votes: 205,
        students_count: 730,
        established_year: 1901,
        lat: 31.905,
        lng: 35.204,
        subjects: SCIENCE,
        features: &["البكالوريا الدولية", "مسرح", "ملعب"],
        criteria: [97.0, 94.0, 92.0, 90.0],
    },
    SchoolSeed {
        id: "wb-003",
        name: "مدرسة الحسين بن علي الثانوية",
        alternate_name: "Al-Hussein Bin Ali Secondary School",
        address: "شارع عين سارة",
        city: "الخليل",
        region: Region::WestBank,
        directorate: Some("الخليل"),
        school_type: SchoolType::Secondary,
        rating: 4.0,
        votes: 119,
        students_count: 1040,
        established_year: 1936,
        lat: 31.532,
        lng: 35.095,
        subjects: HUMANITIES,
        features: &["مكتبة", "ملعب"],
        criteria: [84.0, 82.0, 64.0, 66.0],
    },
    SchoolSeed {
        id: "wb-004",
        name: "مدرسة جنين الصناعية",
        alternate_name: "Jenin Industrial School",
        address: "الحي الشرقي",
        city: "جنين",
        region: Region::WestBank,
        directorate: Some("جنين"),
        school_type: SchoolType::Vocational,
        rating: 3.7,
        votes: 64,
        students_count: 390,
        established_year: 1995,
        lat: 32.461,
        lng: 35.300,
        subjects: TECHNICAL,
        features: &["ورش تدريب"],
        criteria: [74.0, 76.0, 68.0, 57.0],
    },
    SchoolSeed {
        id: "wb-005",
        name: "مدرسة بيت لحم الأساسية",
        alternate_name: "Bethlehem Basic School",
        address: "شارع المهد",
        city: "بيت لحم",
        region: Region::WestBank,
        directorate: Some("بيت لحم"),
        school_type: SchoolType::Basic,
        rating: 4.2,
        votes: 77,
        students_count: 520,
        established_year: 1979,
        lat: 31.705,
        lng: 35.202,
        subjects: HUMANITIES,
        features: &["ملعب", "مكتبة"],
        criteria: [83.0, 86.0, 71.0, 74.0],
    },
    SchoolSeed {
        id: "wb-006",
        name: "روضة زهرة المدائن",
        alternate_name: "Zahrat Al-Madaen Kindergarten",
        address: "البيرة، حي الجنان",
        city: "البيرة",
        region: Region::WestBank,
        directorate: Some("رام الله والبيرة"),
        school_type: SchoolType::Kindergarten,
        rating: 4.5,
        votes: 38,
        students_count: 95,
        established_year: 2016,
        lat: 31.910,
        lng: 35.216,
        subjects: EARLY_YEARS,
        features: &["ساحة ألعاب", "حافلات"],
        criteria: [88.0, 92.0, 81.0, 87.0],
    },
    SchoolSeed {
        id: "wb-007",
        name: "مدرسة طولكرم الثانوية للبنين",
        alternate_name: "Tulkarm Boys Secondary School",
        address: "شارع نابلس",
        city: "طولكرم",
        region: Region::WestBank,
        directorate: Some("طولكرم"),
        school_type: SchoolType::Secondary,
        rating: 3.5,
        votes: 71,
        students_count: 690,
        established_year: 1950,
        lat: 32.311,
        lng: 35.028,
        subjects: SCIENCE,
        features: &["ملعب"],
        criteria: [70.0, 73.0, 55.0, 50.0],
    },
    SchoolSeed {
        id: "wb-008",
        name: "مدرسة أريحا الأساسية للبنات",
        alternate_name: "Jericho Girls Basic School",
        address: "شارع عين السلطان",
        city: "أريحا",
        region: Region::WestBank,
        directorate: Some("أريحا"),
        school_type: SchoolType::Basic,
        rating: 4.1,
        votes: 45,
        students_count: 430,
        established_year: 1988,
        lat: 31.857,
        lng: 35.444,
        subjects: HUMANITIES,
        features: &["حديقة"],
        criteria: [81.0, 83.0, 69.0, 71.0],
    },
];

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// All seeded schools in catalogue order
pub fn schools() -> Vec<SchoolRecord> {
    SEEDS
        .iter()
        .map(|seed| SchoolRecord {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            alternate_name: seed.alternate_name.to_string(),
            address: seed.address.to_string(),
            city: seed.city.to_string(),
            region: seed.region,
            directorate: seed.directorate.map(str::to_string),
            school_type: seed.school_type,
            rating: seed.rating,
            votes: seed.votes,
            students_count: seed.students_count,
            established_year: seed.established_year,
            subjects: to_strings(seed.subjects),
            features: to_strings(seed.features),
            coordinates: Coordinates::new(seed.lat, seed.lng),
        })
        .collect()
}

/// Per-school criteria keyed by school id
pub fn criteria() -> SharedResult<BTreeMap<String, Vec<CriterionScore>>> {
    SEEDS
        .iter()
        .map(|seed| {
            let scores = CRITERIA_LABELS
                .iter()
                .zip(seed.criteria)
                .map(|(label, percentage)| CriterionScore::new(*label, percentage))
                .collect::<SharedResult<Vec<_>>>()?;
            Ok((seed.id.to_string(), scores))
        })
        .collect()
}
