use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg};

/// A US dollar amount, kept exact.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Usd(pub Decimal);

impl Usd {
    pub const ZERO: Usd = Usd(Decimal::ZERO);

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Usd {
    type Output = Usd;

    fn add(self, rhs: Usd) -> Usd {
        Usd(self.0 + rhs.0)
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Usd) {
        self.0 += rhs.0;
    }
}

impl Neg for Usd {
    type Output = Usd;

    fn neg(self) -> Usd {
        Usd(-self.0)
    }
}

impl From<Decimal> for Usd {
    fn from(d: Decimal) -> Self {
        Usd(d)
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} USD", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Earning {
    RegularPay,
    AnnualBonus,
    GroupTermLife,
    PeerBonus,
    StockUnit,
    SpotBonus,
    GsuCRefund,
}

impl Earning {
    pub const ALL: [Earning; 7] = [
        Earning::RegularPay,
        Earning::GroupTermLife,
        Earning::AnnualBonus,
        Earning::PeerBonus,
        Earning::StockUnit,
        Earning::SpotBonus,
        Earning::GsuCRefund,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Earning::RegularPay => "regular_pay",
            Earning::AnnualBonus => "annual_bonus",
            Earning::GroupTermLife => "group_term_life",
            Earning::PeerBonus => "peer_bonus",
            Earning::StockUnit => "stock_unit",
            Earning::SpotBonus => "spot_bonus",
            Earning::GsuCRefund => "gsu_c_refund",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Deduction {
    Bonus401kPre,
    ClassCOffset,
    Dental,
    FsaHealth,
    GroupTermLife,
    InternetReim,
    LegalAccess,
    LongTermDis,
    Medical,
    TransitPreTax,
    Vision,
    VolLifeEe,
    VolLifeSpouse,
}

impl Deduction {
    pub const ALL: [Deduction; 13] = [
        Deduction::Bonus401kPre,
        Deduction::ClassCOffset,
        Deduction::Dental,
        Deduction::FsaHealth,
        Deduction::GroupTermLife,
        Deduction::InternetReim,
        Deduction::LegalAccess,
        Deduction::LongTermDis,
        Deduction::Medical,
        Deduction::TransitPreTax,
        Deduction::Vision,
        Deduction::VolLifeEe,
        Deduction::VolLifeSpouse,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Deduction::Bonus401kPre => "bonus_401k_pre",
            Deduction::ClassCOffset => "class_c_offset",
            Deduction::Dental => "dental",
            Deduction::FsaHealth => "fsa_health",
            Deduction::GroupTermLife => "group_term_life",
            Deduction::InternetReim => "internet_reim",
            Deduction::LegalAccess => "legal_access",
            Deduction::LongTermDis => "long_term_dis",
            Deduction::Medical => "medical",
            Deduction::TransitPreTax => "transit_pre_tax",
            Deduction::Vision => "vision",
            Deduction::VolLifeEe => "vol_life_ee",
            Deduction::VolLifeSpouse => "vol_life_spouse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tax {
    FederalIncome,
    EmployeeMedicare,
    SocialSecurityEmployee,
    CaStateIncome,
    CaPrivateDisabilityEmployee,
}

impl Tax {
    pub const ALL: [Tax; 5] = [
        Tax::FederalIncome,
        Tax::EmployeeMedicare,
        Tax::SocialSecurityEmployee,
        Tax::CaStateIncome,
        Tax::CaPrivateDisabilityEmployee,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tax::FederalIncome => "federal_income",
            Tax::EmployeeMedicare => "employee_medicare",
            Tax::SocialSecurityEmployee => "social_security_employee",
            Tax::CaStateIncome => "ca_state_income",
            Tax::CaPrivateDisabilityEmployee => "ca_private_disability_employee",
        }
    }
}

/// One amount-bearing field of a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    NetPay,
    Earning(Earning),
    Deduction(Deduction),
    Tax(Tax),
    EmployerDeduction(Deduction),
    EmployerRefund,
}

impl Field {
    /// Every field, in the order postings are written.
    pub fn all() -> Vec<Field> {
        let mut all: Vec<Field> = Earning::ALL.iter().map(|e| Field::Earning(*e)).collect();
        all.push(Field::EmployerRefund);
        all.extend(Deduction::ALL.iter().map(|d| Field::Deduction(*d)));
        all.extend(Tax::ALL.iter().map(|t| Field::Tax(*t)));
        all.extend(Deduction::ALL.iter().map(|d| Field::EmployerDeduction(*d)));
        all.push(Field::NetPay);
        all
    }

    /// Stable dotted name, used in account configuration.
    pub fn key(self) -> String {
        match self {
            Field::NetPay => "net_pay".to_string(),
            Field::Earning(e) => format!("earnings.{}", e.key()),
            Field::Deduction(d) => format!("deductions.{}", d.key()),
            Field::Tax(t) => format!("taxes.{}", t.key()),
            Field::EmployerDeduction(d) => format!("employer.{}", d.key()),
            Field::EmployerRefund => "employer.gsu_c_refund".to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    pub regular_pay: Usd,
    pub annual_bonus: Usd,
    pub group_term_life: Usd,
    pub peer_bonus: Usd,
    pub stock_unit: Usd,
    pub spot_bonus: Usd,
    pub gsu_c_refund: Usd,
}

impl Earnings {
    pub fn get(&self, e: Earning) -> Usd {
        match e {
            Earning::RegularPay => self.regular_pay,
            Earning::AnnualBonus => self.annual_bonus,
            Earning::GroupTermLife => self.group_term_life,
            Earning::PeerBonus => self.peer_bonus,
            Earning::StockUnit => self.stock_unit,
            Earning::SpotBonus => self.spot_bonus,
            Earning::GsuCRefund => self.gsu_c_refund,
        }
    }

    pub fn slot(&mut self, e: Earning) -> &mut Usd {
        match e {
            Earning::RegularPay => &mut self.regular_pay,
            Earning::AnnualBonus => &mut self.annual_bonus,
            Earning::GroupTermLife => &mut self.group_term_life,
            Earning::PeerBonus => &mut self.peer_bonus,
            Earning::StockUnit => &mut self.stock_unit,
            Earning::SpotBonus => &mut self.spot_bonus,
            Earning::GsuCRefund => &mut self.gsu_c_refund,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub bonus_401k_pre: Usd,
    pub class_c_offset: Usd,
    pub dental: Usd,
    pub fsa_health: Usd,
    pub group_term_life: Usd,
    pub internet_reim: Usd,
    pub legal_access: Usd,
    pub long_term_dis: Usd,
    pub medical: Usd,
    pub transit_pre_tax: Usd,
    pub vision: Usd,
    pub vol_life_ee: Usd,
    pub vol_life_spouse: Usd,
}

impl Deductions {
    pub fn get(&self, d: Deduction) -> Usd {
        match d {
            Deduction::Bonus401kPre => self.bonus_401k_pre,
            Deduction::ClassCOffset => self.class_c_offset,
            Deduction::Dental => self.dental,
            Deduction::FsaHealth => self.fsa_health,
            Deduction::GroupTermLife => self.group_term_life,
            Deduction::InternetReim => self.internet_reim,
            Deduction::LegalAccess => self.legal_access,
            Deduction::LongTermDis => self.long_term_dis,
            Deduction::Medical => self.medical,
            Deduction::TransitPreTax => self.transit_pre_tax,
            Deduction::Vision => self.vision,
            Deduction::VolLifeEe => self.vol_life_ee,
            Deduction::VolLifeSpouse => self.vol_life_spouse,
        }
    }

    pub fn slot(&mut self, d: Deduction) -> &mut Usd {
        match d {
            Deduction::Bonus401kPre => &mut self.bonus_401k_pre,
            Deduction::ClassCOffset => &mut self.class_c_offset,
            Deduction::Dental => &mut self.dental,
            Deduction::FsaHealth => &mut self.fsa_health,
            Deduction::GroupTermLife => &mut self.group_term_life,
            Deduction::InternetReim => &mut self.internet_reim,
            Deduction::LegalAccess => &mut self.legal_access,
            Deduction::LongTermDis => &mut self.long_term_dis,
            Deduction::Medical => &mut self.medical,
            Deduction::TransitPreTax => &mut self.transit_pre_tax,
            Deduction::Vision => &mut self.vision,
            Deduction::VolLifeEe => &mut self.vol_life_ee,
            Deduction::VolLifeSpouse => &mut self.vol_life_spouse,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxes {
    pub federal_income: Usd,
    pub employee_medicare: Usd,
    pub social_security_employee: Usd,
    pub ca_state_income: Usd,
    pub ca_private_disability_employee: Usd,
}

impl Taxes {
    pub fn get(&self, t: Tax) -> Usd {
        match t {
            Tax::FederalIncome => self.federal_income,
            Tax::EmployeeMedicare => self.employee_medicare,
            Tax::SocialSecurityEmployee => self.social_security_employee,
            Tax::CaStateIncome => self.ca_state_income,
            Tax::CaPrivateDisabilityEmployee => self.ca_private_disability_employee,
        }
    }

    pub fn slot(&mut self, t: Tax) -> &mut Usd {
        match t {
            Tax::FederalIncome => &mut self.federal_income,
            Tax::EmployeeMedicare => &mut self.employee_medicare,
            Tax::SocialSecurityEmployee => &mut self.social_security_employee,
            Tax::CaStateIncome => &mut self.ca_state_income,
            Tax::CaPrivateDisabilityEmployee => &mut self.ca_private_disability_employee,
        }
    }
}

/// Contributions the employer pays on the employee's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub gsu_c_refund: Usd,
    #[serde(flatten)]
    pub deductions: Deductions,
}

/// One paystub, flattened into named amounts. Every amount starts at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date the payment was made.
    pub date: Option<NaiveDate>,
    /// Document number of the statement, if any.
    pub doc_num: String,
    pub net_pay: Usd,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub taxes: Taxes,
    pub employer: Employer,
}

impl Transaction {
    /// The storage behind `field`.
    pub fn slot(&mut self, field: Field) -> &mut Usd {
        match field {
            Field::NetPay => &mut self.net_pay,
            Field::Earning(e) => self.earnings.slot(e),
            Field::Deduction(d) => self.deductions.slot(d),
            Field::Tax(t) => self.taxes.slot(t),
            Field::EmployerDeduction(d) => self.employer.deductions.slot(d),
            Field::EmployerRefund => &mut self.employer.gsu_c_refund,
        }
    }

    pub fn amount(&self, field: Field) -> Usd {
        match field {
            Field::NetPay => self.net_pay,
            Field::Earning(e) => self.earnings.get(e),
            Field::Deduction(d) => self.deductions.get(d),
            Field::Tax(t) => self.taxes.get(t),
            Field::EmployerDeduction(d) => self.employer.deductions.get(d),
            Field::EmployerRefund => self.employer.gsu_c_refund,
        }
    }
}
