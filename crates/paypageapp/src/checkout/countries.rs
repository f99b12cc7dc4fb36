use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub phone_code: &'static str,
    pub currency: &'static str,
}

const fn country(
    code: &'static str,
    name: &'static str,
    flag: &'static str,
    phone_code: &'static str,
    currency: &'static str,
) -> Country {
    Country {
        code,
        name,
        flag,
        phone_code,
        currency,
    }
}

static COUNTRIES: [Country; 26] = [
    country("BR", "Brazil (Brasil)", "/flags/br.svg", "+55", "R$"),
    country("US", "United States", "/flags/us.svg", "+1", "$"),
    country("MX", "Mexico (México)", "/flags/mx.svg", "+52", "$"),
    country("CO", "Colombia", "/flags/co.svg", "+57", "$"),
    country("AR", "Argentina", "/flags/ar.svg", "+54", "$"),
    country("PE", "Peru", "/flags/pe.svg", "+51", "S/"),
    country("CL", "Chile", "/flags/cl.svg", "+56", "$"),
    country("EC", "Ecuador", "/flags/ec.svg", "+593", "$"),
    country("UY", "Uruguay", "/flags/uy.svg", "+598", "$"),
    country("PY", "Paraguay", "/flags/py.svg", "+595", "₲"),
    country("BO", "Bolivia", "/flags/bo.svg", "+591", "Bs"),
    country("VE", "Venezuela", "/flags/ve.svg", "+58", "Bs"),
    country("GT", "Guatemala", "/flags/gt.svg", "+502", "Q"),
    country("CR", "Costa Rica", "/flags/cr.svg", "+506", "₡"),
    country("PA", "Panama", "/flags/pa.svg", "+507", "B/."),
    country("ES", "Spain (España)", "/flags/es.svg", "+34", "€"),
    country("PT", "Portugal", "/flags/pt.svg", "+351", "€"),
    country("FR", "France", "/flags/fr.svg", "+33", "€"),
    country("IT", "Italy", "/flags/it.svg", "+39", "€"),
    country("DE", "Germany", "/flags/de.svg", "+49", "€"),
    country("GB", "United Kingdom", "/flags/gb.svg", "+44", "£"),
    country("CA", "Canada", "/flags/ca.svg", "+1", "$"),
    country("AU", "Australia", "/flags/au.svg", "+61", "$"),
    country("JP", "Japan", "/flags/jp.svg", "+81", "¥"),
    country("CN", "China", "/flags/cn.svg", "+86", "¥"),
    country("IN", "India", "/flags/in.svg", "+91", "₹"),
];

/// Countries offered by the checkout form, Brazil first.
pub fn default_countries() -> &'static [Country] {
    &COUNTRIES
}

/// Case-insensitive lookup by ISO code.
pub fn find_country(code: &str) -> Option<Country> {
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .copied()
}

impl Default for Country {
    fn default() -> Self {
        COUNTRIES[0]
    }
}
