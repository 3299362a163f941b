use crate::error::DomainError;

/// Locales accepted by Zendesk dynamic content, as `(code, id)` pairs.
pub const LOCALES: &[(&str, i64)] = &[
    ("en-US", 1),
    ("es", 2),
    ("de", 8),
    ("zh-tw", 9),
    ("zh-cn", 10),
    ("pl", 13),
    ("fr", 16),
    ("pt-br", 19),
    ("it", 22),
    ("ro", 23),
    ("is", 24),
    ("vi", 26),
    ("ru", 27),
    ("he", 30),
    ("no", 34),
    ("fil", 47),
    ("ar", 66),
    ("ja", 67),
    ("ko", 69),
    ("sl", 72),
    ("hr", 74),
    ("id", 77),
    ("cs", 78),
    ("th", 81),
    ("fi", 84),
    ("tr", 88),
    ("sv", 92),
    ("el", 93),
    ("bg", 94),
    ("et", 101),
    ("da", 1000),
    ("sk", 1003),
    ("nl", 1005),
    ("hu", 1009),
    ("pt", 1011),
    ("fa", 1016),
    ("ca", 1075),
    ("lt", 1092),
    ("lv", 1101),
    ("sr", 1150),
    ("uk", 1173),
    ("en-gb", 1176),
    ("en-ca", 1181),
    ("es-es", 1186),
    ("fr-ca", 1187),
    ("es-419", 1194),
    ("en-au", 1277),
    ("en-in", 1278),
    ("en-ie", 1279),
    ("en-sg", 1281),
    ("en-nz", 1288),
    ("en-za", 1289),
    ("fr-be", 1291),
    ("fr-ch", 1292),
    ("nl-be", 1293),
    ("de-at", 1294),
    ("de-ch", 1295),
    ("hi", 1303),
    ("ms", 1307),
    ("en-be", 1350),
    ("es-mx", 1364),
    ("fr-fr", 1365),
    ("en-ph", 1392),
];

pub fn locale_id(code: &str) -> Option<i64> {
    LOCALES.iter().find(|(c, _)| *c == code).map(|(_, id)| *id)
}

pub fn locale_code(id: i64) -> Option<&'static str> {
    LOCALES.iter().find(|(_, i)| *i == id).map(|(code, _)| *code)
}

/// Every supported locale code, in table order.
pub fn locale_codes() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|(code, _)| *code)
}

pub fn require_locale_id(code: &str) -> Result<i64, DomainError> {
    locale_id(code).ok_or_else(|| DomainError::UnknownLocale(code.to_string()))
}

pub fn require_locale_code(id: i64) -> Result<&'static str, DomainError> {
    locale_code(id).ok_or(DomainError::UnknownLocaleId(id))
}
