//! Subscription plan models and the plan-feature resolver.
//!
//! The backend exposes plans as `productos` rows; which bullet points a
//! plan card shows is decided client-side from the plan's name and
//! price. Tier detection runs in a fixed priority order and returns a
//! hardcoded list per tier.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Backend `productos` row.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Plan {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "estado", default)]
    pub status: String,
    #[serde(rename = "creadoEn", default)]
    pub created_at: Option<String>,
    #[serde(rename = "actualizadoEn", default)]
    pub updated_at: Option<String>,
}

const BASE_FEATURES: [&str; 3] = [
    "Acceso a las noticias",
    "Buscar noticias por nombre",
    "Buscar noticias por categoría",
];

const CLASICO_FEATURES: [&str; 3] = [
    "Buscar noticias por fecha",
    "Descargar datos en CSV",
    "Crear noticias",
];

const PREMIUM_FEATURES: [&str; 3] = [
    "Descargar datos CSV filtrando por fecha y categoría",
    "Realizar ETL de la data descargada",
    "Data Smart con 4 dimensiones",
];

const ANUAL_DISCOUNT: &str = "% de descuento frente al plan mensual";

/// Pricing tier a plan resolves to.
///
/// Tiers are checked in declaration order and the first match wins.
/// The conditions overlap on purpose: a plan named "Premium Anual"
/// priced at 29.99 matches `PremiumMensual` because that tier is
/// checked before `Anual`. Do not reorder without product confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Clasico,
    PremiumMensual,
    Anual,
    Unknown,
}

impl PlanTier {
    /// Resolve the tier from a display name and price.
    ///
    /// Name matching is case-insensitive; only the "clásico"/"clasico"
    /// pair is accent-tolerant, as a narrow special case. An absent
    /// name or price is passed in as `""` / `0.0`.
    pub fn from_plan(name: &str, price: f64) -> Self {
        let name = name.to_lowercase();

        if name.contains("free") || name.contains("gratis") || price == 0.0 {
            PlanTier::Free
        } else if name.contains("clásico")
            || name.contains("clasico")
            || (price - 14.99).abs() < 0.01
        {
            PlanTier::Clasico
        } else if name.contains("premium mensual")
            || (name.contains("premium") && (price - 29.99).abs() < 0.01)
        {
            PlanTier::PremiumMensual
        } else if name.contains("anual") || (price - 249.99).abs() < 0.5 {
            PlanTier::Anual
        } else {
            PlanTier::Unknown
        }
    }

    /// Ordered feature bullets for this tier.
    pub fn features(&self) -> Vec<String> {
        let picked: Vec<&str> = match self {
            PlanTier::Free | PlanTier::Unknown => BASE_FEATURES.to_vec(),
            PlanTier::Clasico => BASE_FEATURES
                .iter()
                .chain(CLASICO_FEATURES.iter())
                .copied()
                .collect(),
            PlanTier::PremiumMensual => BASE_FEATURES
                .iter()
                .chain(CLASICO_FEATURES.iter())
                .chain(PREMIUM_FEATURES.iter())
                .copied()
                .collect(),
            PlanTier::Anual => BASE_FEATURES
                .iter()
                .chain(CLASICO_FEATURES.iter())
                .chain(PREMIUM_FEATURES.iter())
                .chain(std::iter::once(&ANUAL_DISCOUNT))
                .copied()
                .collect(),
        };

        picked.into_iter().map(str::to_string).collect()
    }
}

/// Resolve the ordered feature list for a plan name and price.
///
/// Never fails; unknown plans fall back to the base list, so the
/// result always has at least 3 entries.
pub fn resolve_features(name: &str, price: f64) -> Vec<String> {
    PlanTier::from_plan(name, price).features()
}

/// Accent-folded, lowercased, trimmed plan name for equality checks.
pub fn normalize_plan_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Whether a plan is the free tier (by name or zero price).
pub fn is_free_plan(name: &str, price: f64) -> bool {
    let normalized = normalize_plan_name(name);
    normalized.contains("free") || normalized.contains("gratis") || price == 0.0
}

/// Keep only active subscription plans, preserving backend order.
pub fn active_subscriptions(plans: Vec<Plan>) -> Vec<Plan> {
    plans
        .into_iter()
        .filter(|p| p.kind == "SUSCRIPCION" && p.status == "ACTIVO")
        .collect()
}

/// Whether the given plan can be purchased by a user currently on
/// `current_plan`.
///
/// The user's own plan is blocked, and once the user holds any paid
/// plan the free plan is blocked too (no downgrades through checkout).
pub fn is_plan_disabled(plan: &Plan, current_plan: Option<&str>) -> bool {
    let current = match current_plan {
        Some(name) => normalize_plan_name(name),
        None => return false,
    };
    if current.is_empty() {
        return false;
    }

    let plan_name = normalize_plan_name(&plan.name);
    if !plan_name.is_empty() && plan_name == current {
        return true;
    }

    let current_is_free = current.contains("free") || current.contains("gratis");
    !current_is_free && is_free_plan(&plan.name, plan.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(name: &str, price: f64, kind: &str, status: &str) -> Plan {
        Plan {
            id: 1,
            name: name.to_string(),
            description: String::new(),
            price,
            kind: kind.to_string(),
            status: status.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_zero_price_is_free_regardless_of_name() {
        assert_eq!(PlanTier::from_plan("Cualquier Plan", 0.0), PlanTier::Free);
        assert_eq!(resolve_features("Cualquier Plan", 0.0).len(), 3);
    }

    #[test]
    fn test_free_by_name_regardless_of_price() {
        for name in ["Plan Free", "plan gratis", "FREE anual"] {
            assert_eq!(PlanTier::from_plan(name, 99.0), PlanTier::Free, "{name}");
            assert_eq!(
                resolve_features(name, 99.0),
                BASE_FEATURES.map(String::from).to_vec()
            );
        }
    }

    #[test]
    fn test_clasico_by_accented_and_plain_name() {
        assert_eq!(
            PlanTier::from_plan("Plan Clásico Mensual", 14.99),
            PlanTier::Clasico
        );
        assert_eq!(PlanTier::from_plan("plan clasico", 1.0), PlanTier::Clasico);
    }

    #[test]
    fn test_clasico_list_has_six_entries() {
        let features = resolve_features("Plan Clásico Mensual", 14.99);
        assert_eq!(features.len(), 6);
        assert_eq!(features[0], "Acceso a las noticias");
        assert_eq!(features[5], "Crear noticias");
    }

    #[test]
    fn test_clasico_by_price_within_tolerance() {
        // 14.985 is within the 0.01 window around 14.99.
        assert_eq!(
            resolve_features("plan clasico", 14.985),
            resolve_features("Plan Clásico Mensual", 14.99)
        );
        assert_eq!(PlanTier::from_plan("otro", 14.985), PlanTier::Clasico);
        assert_ne!(PlanTier::from_plan("otro", 15.01), PlanTier::Clasico);
    }

    #[test]
    fn test_premium_mensual_list_has_nine_entries() {
        let features = resolve_features("Premium Mensual", 29.99);
        assert_eq!(features.len(), 9);
        assert!(features.contains(&"Data Smart con 4 dimensiones".to_string()));
    }

    #[test]
    fn test_premium_requires_price_without_mensual_in_name() {
        assert_eq!(
            PlanTier::from_plan("Plan Premium", 29.99),
            PlanTier::PremiumMensual
        );
        // "premium" alone at another price falls through to later tiers.
        assert_eq!(PlanTier::from_plan("Plan Premium", 19.99), PlanTier::Unknown);
    }

    #[test]
    fn premium_anual_at_mensual_price_matches_mensual() {
        // Known overlap, preserved on purpose: the Premium Mensual tier
        // is checked before Anual, so this resolves to the monthly
        // list, not the annual one.
        let features = resolve_features("Premium Anual", 29.99);
        assert_eq!(features.len(), 9);
        assert!(!features.contains(&ANUAL_DISCOUNT.to_string()));
    }

    #[test]
    fn test_anual_list_includes_discount_note() {
        let features = resolve_features("Premium Anual", 249.99);
        assert_eq!(features.len(), 10);
        assert_eq!(features[9], ANUAL_DISCOUNT);

        // Anual price tolerance is the wider 0.5 window.
        assert_eq!(PlanTier::from_plan("otro", 249.60), PlanTier::Anual);
        assert_eq!(PlanTier::from_plan("otro", 250.60), PlanTier::Unknown);
    }

    #[test]
    fn test_unknown_falls_back_to_base_list() {
        let features = resolve_features("Plan Corporativo", 99.0);
        assert_eq!(features, BASE_FEATURES.map(String::from).to_vec());
    }

    #[test]
    fn test_empty_name_and_price_resolve_to_free() {
        assert_eq!(PlanTier::from_plan("", 0.0), PlanTier::Free);
    }

    #[test]
    fn test_normalize_plan_name_folds_accents() {
        assert_eq!(normalize_plan_name("  Plan Clásico "), "plan clasico");
        assert_eq!(
            normalize_plan_name("PREMIUM MENSUAL"),
            normalize_plan_name("premium mensual")
        );
    }

    #[test]
    fn test_active_subscriptions_filters_type_and_status() {
        let plans = vec![
            plan("Plan Free", 0.0, "SUSCRIPCION", "ACTIVO"),
            plan("Clásico", 14.99, "SUSCRIPCION", "INACTIVO"),
            plan("Merch", 9.99, "OTRO", "ACTIVO"),
            plan("Premium Mensual", 29.99, "SUSCRIPCION", "ACTIVO"),
        ];

        let active = active_subscriptions(plans);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "Plan Free");
        assert_eq!(active[1].name, "Premium Mensual");
    }

    #[test]
    fn test_own_plan_is_disabled() {
        let p = plan("Plan Clásico Mensual", 14.99, "SUSCRIPCION", "ACTIVO");
        assert!(is_plan_disabled(&p, Some("plan clasico mensual")));
        assert!(!is_plan_disabled(&p, Some("Plan Free")));
        assert!(!is_plan_disabled(&p, None));
    }

    #[test]
    fn test_free_plan_disabled_for_paid_users() {
        let free = plan("Plan Free", 0.0, "SUSCRIPCION", "ACTIVO");
        assert!(is_plan_disabled(&free, Some("Premium Mensual")));
        assert!(is_plan_disabled(&free, Some("Plan Free")));
        assert!(!is_plan_disabled(&free, None));
    }
}
