//! Test fixture data.
//!
//! `SEED_QUERIES` extends the embedded cozo catalog with queries that fill the
//! three tables from inline rows. The CSV constants mirror the source file
//! layouts read by the `create_table_*` queries.

/// Seed definitions appended to the embedded cozo catalog.
///
/// Spain has total, male and female rows for 2023 and a total row for 2022;
/// Italy has a 2023 total row with a missing age group. Fertility for 2020
/// covers Spain only.
pub const SEED_QUERIES: &str = r#"
-- name: seed_country()
?[alpha_3, name, alpha_2, code, region, sub_region, region_code, sub_region_code] <- [
    ['ESP', 'Spain', 'ES', '724', 'Europe', 'Southern Europe', '150', '039'],
    ['ITA', 'Italy', 'IT', '380', 'Europe', 'Southern Europe', '150', '039'],
    ['FRA', 'France', 'FR', '250', 'Europe', 'Western Europe', '150', '155'],
    ['JPN', 'Japan', 'JP', '392', 'Asia', 'Eastern Asia', '142', '030']
]
:replace country {
    alpha_3: String
    =>
    name: String, alpha_2: String, code: String, region: String, sub_region: String,
    region_code: String, sub_region_code: String
}

-- name: seed_demography()
?[code, year, type, years_0_4, years_5_14, years_15_24, years_25_64, years_65_plus] <- [
    ['ESP', 2023, 't', 100, 200, 300, 400, 500],
    ['ESP', 2023, 'm', 51, 102, 153, 198, 220],
    ['ESP', 2023, 'f', 49, 98, 147, 202, 280],
    ['ESP', 2022, 't', 110, 205, 295, 398, 490],
    ['ITA', 2023, 't', 80, 170, 260, 390, null]
]
:replace demography {
    code: String, year: Int, type: String
    =>
    years_0_4: Int?, years_5_14: Int?, years_15_24: Int?, years_25_64: Int?, years_65_plus: Int?
}

-- name: seed_fertility()
?[country, year, fertility] <- [
    ['ESP', 2020, 1.2],
    ['ESP', 2021, 1.19],
    ['ITA', 2021, 1.25],
    ['FRA', 2021, 1.8]
]
:replace fertility {country: String, year: Int => fertility: Float}
"#;

/// Seed queries in the order they must run.
pub const SEED_STEPS: [&str; 3] = ["seed_country", "seed_demography", "seed_fertility"];

/// ISO-3166 `all.csv` layout.
pub const COUNTRIES_CSV: &str = "\
name,alpha-2,alpha-3,country-code,iso_3166-2,region,sub-region,intermediate-region,region-code,sub-region-code,intermediate-region-code
Spain,ES,ESP,724,ISO 3166-2:ES,Europe,Southern Europe,,150,039,
Italy,IT,ITA,380,ISO 3166-2:IT,Europe,Southern Europe,,150,039,
Japan,JP,JPN,392,ISO 3166-2:JP,Asia,Eastern Asia,,142,030,
";

/// Normalized demography layout; the blank-code row is an aggregate and is dropped.
pub const DEMOGRAPHY_CSV: &str = "\
code,year,type,years_0_4,years_5_14,years_15_24,years_25_64,years_65_plus
ESP,2023,t,100,200,300,400,500
ESP,2023,m,51,102,153,198,220
ESP,2023,f,49,98,147,202,280
,2023,t,9000,9000,9000,9000,9000
ITA,2023,t,80,170,260,390,410
";

/// Fertility layout; the blank-code row is a region aggregate and is dropped.
pub const FERTILITY_CSV: &str = "\
Entity,Code,Year,Fertility Rate
Spain,ESP,2020,1.2
Spain,ESP,2021,1.19
Europe,,2021,1.5
Italy,ITA,2021,1.25
";
