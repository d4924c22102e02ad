//! Personnel fictif pour essayer l'outil.

use crate::model::{Person, PersonId};
use rand::seq::SliceRandom;
use rand::Rng;

const LAST_NAMES: &[&str] = &[
    "Nguyễn", "Trần", "Lê", "Phạm", "Hoàng", "Huỳnh", "Phan", "Vũ", "Võ", "Đặng", "Bùi", "Đỗ",
    "Hồ", "Ngô", "Dương", "Lý",
];
const MIDDLE_NAMES: &[&str] = &[
    "Văn", "Thị", "Hữu", "Đức", "Thành", "Công", "Minh", "Ngọc", "Xuân", "Thu", "Đình", "Bảo",
];
const FIRST_NAMES: &[&str] = &[
    "Anh", "Bình", "Châu", "Dũng", "Em", "Giang", "Hà", "Hải", "Hiếu", "Hòa", "Huy", "Khánh",
    "Lan", "Long", "Minh", "Nam", "Nghĩa", "Phong", "Phúc", "Quân", "Quang", "Sơn", "Thái",
    "Thắng", "Thanh", "Thảo", "Thịnh", "Trung", "Tuấn", "Tùng", "Việt", "Vinh", "Uyên", "Yến",
];

/// Effectif par défaut de la démo.
pub const DEFAULT_COUNT: usize = 123;

/// Génère `count` personnes `p-1..p-count`, noms tirés au hasard et suffixés du rang.
pub fn generate_personnel<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Person> {
    (1..=count)
        .map(|i| {
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Nguyễn");
            let mid = MIDDLE_NAMES.choose(rng).copied().unwrap_or("Văn");
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Anh");
            Person::with_id(
                PersonId::new(format!("p-{i}")),
                format!("{last} {mid} {first} ({i})"),
            )
        })
        .collect()
}
