//! Common regex patterns for policy endorsement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Endorsement markers (any number); a block ends where the next one starts
    pub static ref ENDORSEMENT_MARKER: Regex = Regex::new(
        r"(?i)Endt\.\s*No\."
    ).unwrap();

    pub static ref ENDORSEMENT_ID: Regex = Regex::new(
        r"(?i:Endt\.\s*No\.)\s*([0-9]+[a-z]?)"
    ).unwrap();

    // Special condition headings, with the rest of their line
    pub static ref SPECIAL_CONDITION: Regex = Regex::new(
        r"(?i)\bspecial\s+conditions?\b[^\n]*"
    ).unwrap();

    // Category markers
    pub static ref DAILY_CASH_MARKER: Regex = Regex::new(r"(?i)Endt\.\s*No\.\s*14").unwrap();
    pub static ref CONVALESCENCE_MARKER: Regex = Regex::new(r"(?i)Endt\.\s*No\.\s*15").unwrap();
    pub static ref AMBULANCE_MARKER: Regex = Regex::new(r"(?i)Endt\.\s*No\.\s*16").unwrap();
    pub static ref HOME_NURSING_MARKER: Regex = Regex::new(r"(?i)Endt\.\s*No\.\s*17").unwrap();
    pub static ref CRITICAL_ILLNESS_MARKER: Regex = Regex::new(r"(?i)Endt\.\s*No\.\s*20").unwrap();

    // Ambulance cover
    pub static ref AMBULANCE_TRIPS: Regex = Regex::new(
        r"(?i)number of trips[:\s]+([0-9]+)"
    ).unwrap();

    pub static ref AMBULANCE_LIMIT: Regex = Regex::new(
        r"(?i)limit of Rs\.?\s*([0-9,]+)"
    ).unwrap();

    // Convalescence benefit
    pub static ref CONVALESCENCE_MIN_STAY: Regex = Regex::new(
        r"(?i)exceeds\s+([0-9]+)\s+days"
    ).unwrap();

    pub static ref CONVALESCENCE_BENEFIT_AMOUNT: Regex = Regex::new(
        r"(?i)benefit of Rs\.?\s*([0-9,]+)"
    ).unwrap();

    // Home nursing allowance
    pub static ref NURSING_POST_DISCHARGE: Regex = Regex::new(
        r"(?i)following discharge"
    ).unwrap();

    pub static ref NURSING_MAX_DAYS: Regex = Regex::new(
        r"(?i)maximum\s+([0-9]+)\s+days"
    ).unwrap();

    pub static ref NURSING_DAILY_ALLOWANCE: Regex = Regex::new(
        r"(?i)daily allowance of Rs\.?\s*([0-9,]+)"
    ).unwrap();

    // Critical illness (over-and-above phrasing may wrap across lines)
    pub static ref CI_OVER_AND_ABOVE: Vec<Regex> = [
        r"(?is)over and above.*?sum insured",
        r"(?is)over and above.*?individual sum insured",
        r"(?is)over and above.*?policy sum insured",
        r"(?is)over and above.*?individual",
        r"(?is)over and above.*?insured",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub static ref CI_SUM_INSURED_PER_PERSON: Regex = Regex::new(
        r"(?i)sum insured of Rs\.?\s*([0-9,]+)"
    ).unwrap();

    pub static ref CI_MAXIMUM_LIMIT: Regex = Regex::new(
        r"(?i)maximum limit of Rs\.?\s*([0-9,]+)"
    ).unwrap();

    pub static ref CI_SURVIVAL_GATE: Vec<Regex> = [
        r"(?i)survival period",
        r"(?i)waiting period",
        r"(?i)minimum survival",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub static ref CI_SURVIVAL_DURATION: Regex = Regex::new(
        r"(?i)([0-9]+)\s*(?:days?|months?|years?)\s*(?:survival|waiting)"
    ).unwrap();

    // Daily cash cover
    pub static ref DC_OVER_AND_ABOVE: Vec<Regex> = [
        r"(?i)over and above.*?sum insured",
        r"(?i)over and above.*?individual sum insured",
        r"(?i)over and above.*?policy sum insured",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub static ref DC_MAX_DAYS_PER_POLICY: Regex = Regex::new(
        r"(?i)maximum days of\s*([0-9]+)\s*per.*?policy"
    ).unwrap();

    pub static ref DC_MAX_DAYS_PER_EVENT: Regex = Regex::new(
        r"(?i)maximum days of\s*([0-9]+)\s*per.*?event"
    ).unwrap();

    pub static ref DC_MAX_DAYS: Regex = Regex::new(
        r"(?i)maximum days of\s*([0-9]+)"
    ).unwrap();

    pub static ref DC_OPEN_RANGE: Vec<Regex> = [
        r"(?i)ranging from",
        r"(?i)range from",
        r"(?i)from.*?to.*?rs",
        r"(?i)rs.*?to.*?rs",
        r"(?i)between.*?rs",
        r"(?i)rs.*?-\s*rs",
        r"(?i)rs.*?and.*?rs",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub static ref DC_SUM_INSURED: Regex = Regex::new(
        r"(?i)sum insured.*?Rs\.?\s*([0-9,]+)"
    ).unwrap();

    pub static ref DC_MORE_THAN_DAYS: Regex = Regex::new(
        r"(?i)more than\s*([0-9]+)\s*days"
    ).unwrap();

    pub static ref DC_AMOUNT_PER_DAY: Regex = Regex::new(
        r"(?i)Rs\.?\s*([0-9,]+)\s*per day"
    ).unwrap();

    pub static ref DC_AMOUNT_FROM_TO_DAYS: Regex = Regex::new(
        r"(?i)Rs\.?\s*([0-9,]+)\s*from\s*[0-9]+\s*to\s*[0-9]+\s*days"
    ).unwrap();

    pub static ref DC_AMOUNT_RANGE: Regex = Regex::new(
        r"(?i)ranging from\s*rs\.?\s*([0-9,]+)\s*-\s*([0-9,]+)"
    ).unwrap();

    pub static ref DC_FIRST_DAYS: Regex = Regex::new(
        r"(?i)first\s*([0-9]+)\s*days"
    ).unwrap();

    pub static ref DC_MATERNITY: Regex = Regex::new(
        r"(?i)maternity"
    ).unwrap();
}
