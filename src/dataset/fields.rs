// src/dataset/fields.rs

pub const COUNTRY: &str = "Country";
pub const YEAR: &str = "Year";

pub const TOTAL_POPULATION: &str = "Total_Population";
pub const LIFE_EXPECTANCY: &str = "Life_Expectancy";
pub const LOG_GDP_PER_CAPITA: &str = "log_GDP_Per_Capita";
pub const AGGREGATE_SCORE: &str = "Aggregate_Score";

/// Columns of the global health table that are coerced to `f64` on load.
pub static NUMERIC_FIELDS: &[&str] = &[
    "Fertility_Rate",
    "Urban_Population_Percent",
    TOTAL_POPULATION,
    "Water_Access_Percent",
    "Unemployment_Rate",
    "Sanitary_Expense_Per_GDP",
    LIFE_EXPECTANCY,
    "Life_Expectancy_Female",
    "Life_Expectancy_Male",
    "Infant_Deaths",
    "GDP_Per_Capita",
    "Hospital_Beds_Per_1000",
    "Female_Population",
    "Male_Population",
    "Alcohol_Consumption_Per_Capita",
    "Immunization_Rate",
    "Sanitary_Expense_Per_Capita",
    "CO2_Exposure_Percent",
    "Air_Pollution",
    "Labour_Force_Total",
    "Tuberculosis_Per_100000",
    "Suicide_Rate_Percent",
    "Obesity_Rate_Percent",
    "Underweight_Rate_Percent",
    "Overweight_Rate_Percent",
    "Safe_Water_Access_Percent",
    LOG_GDP_PER_CAPITA,
    "Life_Expectancy_Score",
    "log_GDP_Per_Capita_Score",
    "Safe_Water_Access_Percent_Score",
    "Unemployment_Rate_Score",
    "Immunization_Rate_Score",
    AGGREGATE_SCORE,
];
