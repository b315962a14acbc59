//! Static tenant registry
//!
//! Populated once at startup with the built-in demo tenants; lookups are
//! total, resolving unknown ids to a generic default profile.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::client::{
    AiFeatures, ClientConfig, ContactInfo, Industry, LeadCapture, LeadRouting, ResponseRule,
};

static REGISTRY: Lazy<ClientRegistry> = Lazy::new(ClientRegistry::builtin);

/// Maps a tenant id to its immutable business profile
pub struct ClientRegistry {
    clients: HashMap<String, ClientConfig>,
    default: ClientConfig,
}

impl ClientRegistry {
    /// Process-wide registry instance
    pub fn shared() -> &'static ClientRegistry {
        &REGISTRY
    }

    /// Registry with the built-in demo tenants
    pub fn builtin() -> Self {
        let mut clients = HashMap::new();
        for config in [real_estate_demo(), law_firm_demo(), ecommerce_demo()] {
            clients.insert(config.client_id.clone(), config);
        }
        tracing::debug!(tenants = clients.len(), "client registry populated");
        Self {
            clients,
            default: default_config(),
        }
    }

    /// Resolve a tenant id, falling back to the generic default profile.
    /// Never fails.
    pub fn get(&self, client_id: &str) -> &ClientConfig {
        self.clients.get(client_id).unwrap_or(&self.default)
    }

    /// Configured tenant ids, sorted for stable output
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn default_config() -> ClientConfig {
    ClientConfig {
        client_id: "default".into(),
        business_name: "Business".into(),
        industry: Industry::General,
        contact: ContactInfo {
            phone: Some("(555) 123-4567".into()),
            ..ContactInfo::default()
        },
        responses: Vec::new(),
        fallback_response: Some(
            "Thank you for contacting us. Please call {phone} for assistance.".into(),
        ),
        ai_features: AiFeatures::default(),
        lead_capture: LeadCapture::default(),
        lead_routing: None,
    }
}

fn real_estate_demo() -> ClientConfig {
    ClientConfig {
        client_id: "real-estate-demo".into(),
        business_name: "Dream Homes Realty".into(),
        industry: Industry::RealEstate,
        contact: ContactInfo {
            phone: Some("(555) DREAM-HOME".into()),
            email: Some("info@dreamhomes.com".into()),
            website: Some("www.dreamhomes.com".into()),
            address: Some("456 Real Estate Ave, Downtown".into()),
        },
        responses: vec![
            ResponseRule::new(
                "hello|hi|hey|good morning|good afternoon|good evening",
                "Hello! Welcome to Dream Homes Realty. I'm here to help you with all your \
                 real estate needs. How can I assist you today?",
            ),
            ResponseRule::new(
                "how are you|how's it going|how are things",
                "I'm doing great, thank you for asking! I'm here to help you find your \
                 perfect home. What brings you to Dream Homes Realty today?",
            ),
            ResponseRule::new(
                "thanks|thank you|appreciate it|thank you so much",
                "You're very welcome! I'm here to help. Is there anything else you'd like \
                 to know about our properties or services?",
            ),
            ResponseRule::new(
                "what can you help|what do you do|how can you help|what services|what can you do",
                "I'm your Dream Homes Realty assistant! I can help you with property \
                 searches and recommendations, market information and trends, scheduling \
                 viewings, property valuations, and connecting with our agents. What \
                 would you like to know about?",
            ),
            ResponseRule::new(
                "property search|find home|buy house|looking for|available properties|show me properties",
                "Property Search:\n\n- What type of property are you looking for? (house, \
                 condo, townhouse)\n- What's your budget range?\n- Preferred neighborhoods \
                 or areas?\n- Timeline for purchase?\n\nI can help you find the perfect property!",
            ),
            ResponseRule::new(
                "market info|prices|trends|values",
                "Market Information:\n\n- Average home price: $485,000\n- Market trend: \
                 Steady growth\n- Days on market: 28 days\n- Inventory level: Balanced\n\n\
                 Would you like specific neighborhood data?",
            ),
            ResponseRule::new(
                "schedule viewing|appointment|tour",
                "Schedule a Viewing:\n\n- Available times: Weekdays 9AM-6PM, Saturdays \
                 10AM-4PM\n- Virtual tours available\n- In-person showings with safety \
                 protocols\n\nCall us at {phone} to schedule!",
            ),
            ResponseRule::new(
                "selling|list property|market value",
                "Selling Your Property:\n\n- Free market analysis\n- Professional \
                 photography included\n- Marketing on multiple platforms\n- Negotiation \
                 support\n\nLet's discuss your property details!",
            ),
            ResponseRule::new(
                "agent|realtor|broker",
                "Our Agents:\n\n- Licensed professionals with 5+ years experience\n- \
                 Specialized in your area\n- Available 7 days a week\n- Personalized \
                 service\n\nWho would you like to work with?",
            ),
            ResponseRule::new(
                "hours|open|time|schedule",
                "Office Hours:\n\n- Monday-Friday: 9:00 AM - 6:00 PM\n- Saturday: \
                 10:00 AM - 4:00 PM\n- Sunday: Closed\n\nEmergency appointments available \
                 for urgent matters.",
            ),
            ResponseRule::new(
                "contact|phone|call",
                "Contact Dream Homes Realty:\n\nPhone: {phone}\nEmail: {email}\nWebsite: \
                 {website}\nAddress: {address}\n\nWe're here to help with all your real \
                 estate needs!",
            ),
        ],
        fallback_response: Some(
            "I don't have specific information about that property, but our agents can \
             help!\n\nCall us: {phone}\nEmail: {email}\nVisit: {website}\n\nOur \
             experienced real estate agents are here to assist you.\n\nI can help with \
             property searches, market information, or scheduling viewings though!"
                .into(),
        ),
        ai_features: AiFeatures::all(),
        lead_capture: LeadCapture {
            enabled: true,
            required_fields: vec![
                "name".into(),
                "email".into(),
                "phone".into(),
                "property_type".into(),
            ],
            optional_fields: vec![
                "budget_range".into(),
                "timeline".into(),
                "location_preference".into(),
                "property_features".into(),
            ],
            case_types: vec![
                "Buying".into(),
                "Selling".into(),
                "Renting".into(),
                "Investment".into(),
                "Commercial".into(),
            ],
            product_categories: Vec::new(),
            budget_ranges: Vec::new(),
        },
        lead_routing: None,
    }
}

fn law_firm_demo() -> ClientConfig {
    ClientConfig {
        client_id: "law-firm-demo".into(),
        business_name: "Justice Partners Law Firm".into(),
        industry: Industry::Legal,
        contact: ContactInfo {
            phone: Some("(555) LAW-FIRM".into()),
            email: Some("info@justicepartners.com".into()),
            website: Some("www.justicepartners.com".into()),
            address: Some("123 Legal Plaza, Downtown".into()),
        },
        responses: vec![
            // Declared first on purpose: a concrete injury description should
            // get the case assessment, not the generic greeting.
            ResponseRule::new(
                "personal injury|accident|car crash|car accident|drunk driver|neck pain|missed work",
                "Personal Injury Case Assessment:\n\nBased on your description, this \
                 appears to be a strong personal injury case with the following \
                 factors:\n\n- Clear Liability: Drunk driver at fault\n- Significant \
                 Injuries: Neck pain requiring medical attention\n- Economic Damages: \
                 Lost wages from missed work\n- Negligence: Driving under the \
                 influence\n\nNext Steps:\n- Schedule a free consultation to discuss \
                 your case\n- Document all medical treatments and expenses\n- Keep \
                 records of missed work and lost wages\n- Don't speak to insurance \
                 companies without legal representation\n\nOur Contingency Fee: No fees \
                 unless we win your case!\n\nCall us at {phone} for immediate assistance.",
            ),
            ResponseRule::new(
                "hello|hi|hey|good morning|good afternoon|good evening",
                "Hello! Welcome to Justice Partners Law Firm. I'm here to help you \
                 understand our legal services and connect you with the right attorney. \
                 How can I assist you today?",
            ),
            ResponseRule::new(
                "how are you|how's it going|how are things",
                "I'm doing well, thank you for asking! I'm here to help you with your \
                 legal needs. What brings you to Justice Partners Law Firm today?",
            ),
            ResponseRule::new(
                "thanks|thank you|appreciate it|thank you so much",
                "You're very welcome! I'm here to help. Is there anything else you'd \
                 like to know about our legal services?",
            ),
            ResponseRule::new(
                "hours|open|time|schedule",
                "Our office hours are:\n\n- Monday-Friday: 8:00 AM - 6:00 PM\n- \
                 Saturday: 9:00 AM - 2:00 PM\n- Sunday: Closed\n\nWe offer emergency \
                 consultations outside business hours for urgent legal matters.",
            ),
            ResponseRule::new(
                "consultation|meet|appointment",
                "Free Initial Consultation:\n\n- 30-minute free consultation to discuss \
                 your case\n- No obligation to hire our firm\n- Available in-person or \
                 via video call\n\nTo schedule: Call {phone} or email {email}",
            ),
            ResponseRule::new(
                "fees|cost|price|payment",
                "Our Fee Structure:\n\n- Free initial consultation\n- Contingency fees \
                 for personal injury cases\n- Hourly rates: $250-400/hour\n- Flat fees \
                 for certain services\n- Payment plans available\n\nContact us for a \
                 detailed quote based on your specific case.",
            ),
            ResponseRule::new(
                "services|practice|areas",
                "Our Practice Areas:\n\n- Personal Injury Law\n- Family Law & Divorce\n- \
                 Criminal Defense\n- Immigration Law\n- Real Estate Law\n- Business \
                 Law\n- Estate Planning\n- Employment Law\n\nWe have over 20 years of \
                 combined experience in these areas.",
            ),
            ResponseRule::new(
                "family law|divorce|custody",
                "Family Law Services:\n\n- Divorce and separation\n- Child custody and \
                 support\n- Property division\n- Prenuptial agreements\n- Adoption\n\n\
                 We handle cases with compassion and expertise.",
            ),
            ResponseRule::new(
                "criminal|arrest|charges",
                "Criminal Defense:\n\n- DUI/DWI charges\n- Drug offenses\n- Assault and \
                 battery\n- Theft and fraud\n- White-collar crimes\n\nWe provide \
                 aggressive defense and protect your rights.",
            ),
            ResponseRule::new(
                "immigration|visa|citizenship|green card|deportation|asylum",
                "Immigration Law Services:\n\n- Visa applications: work, student and \
                 family visas\n- Green card processing\n- Citizenship and \
                 naturalization\n- Deportation defense\n- Asylum and refugee status\n\n\
                 Our experienced immigration team offers a free initial consultation.\n\n\
                 Call us at {phone} to discuss your immigration case!",
            ),
            ResponseRule::new(
                "business|corporate|contract|startup|llc|incorporation|partnership|merger|acquisition",
                "Business Law Services:\n\n- Corporate formation: LLCs, corporations, \
                 partnerships\n- Contract drafting, review and disputes\n- Business \
                 litigation\n- Mergers & acquisitions\n- Intellectual property \
                 protection\n\nFlat-fee packages available, with a free initial \
                 consultation.\n\nCall us at {phone} for business legal services!",
            ),
            ResponseRule::new(
                "employment|workplace|discrimination|harassment|wrongful termination|wage|overtime|fmla|ada",
                "Employment Law Services:\n\n- Workplace discrimination\n- Sexual \
                 harassment\n- Wrongful termination and retaliation\n- Wage and hour \
                 violations\n- FMLA and ADA accommodations\n- Severance negotiations\n\n\
                 Confidential consultations with our employment specialists.\n\nCall us \
                 at {phone} to discuss your workplace case!",
            ),
            ResponseRule::new(
                "real estate|property|landlord|tenant|eviction|title|closing|mortgage|foreclosure",
                "Real Estate Law Services:\n\n- Property disputes: boundaries and \
                 easements\n- Landlord-tenant matters and evictions\n- Transactions, \
                 closings and title issues\n- Foreclosure defense and loan \
                 modifications\n- Zoning and land use\n\nFlat-fee transaction packages \
                 available.\n\nCall us at {phone} for real estate legal help!",
            ),
            ResponseRule::new(
                "estate|will|trust|probate|inheritance|power of attorney|guardianship|estate tax",
                "Estate Planning Services:\n\n- Wills and trusts\n- Probate \
                 administration\n- Trust administration\n- Power of attorney and \
                 healthcare directives\n- Guardianship\n- Estate tax planning\n\nCall \
                 us at {phone} to plan your legacy!",
            ),
        ],
        fallback_response: Some(
            "I don't have specific information about that legal matter, but our \
             attorneys can help!\n\nCall us: {phone}\nEmail: {email}\nVisit: \
             {website}\n\nFor legal advice, please schedule a consultation with our \
             experienced attorneys.\n\nI can help with general information about our \
             services, consultation fees, or office hours though!"
                .into(),
        ),
        ai_features: AiFeatures::all(),
        lead_capture: LeadCapture {
            enabled: true,
            required_fields: vec![
                "name".into(),
                "email".into(),
                "phone".into(),
                "case_type".into(),
            ],
            optional_fields: vec![
                "case_description".into(),
                "urgency".into(),
                "budget_range".into(),
            ],
            case_types: vec![
                "Personal Injury".into(),
                "Family Law".into(),
                "Criminal Defense".into(),
                "Real Estate".into(),
                "Business Law".into(),
                "Estate Planning".into(),
                "Employment Law".into(),
            ],
            product_categories: Vec::new(),
            budget_ranges: Vec::new(),
        },
        lead_routing: Some(LeadRouting {
            high_value_threshold: 75,
            senior_attorney_threshold: 85,
            urgent_escalation_threshold: 80,
        }),
    }
}

fn ecommerce_demo() -> ClientConfig {
    ClientConfig {
        client_id: "ecommerce-demo".into(),
        business_name: "TechGear Online Store".into(),
        industry: Industry::Ecommerce,
        contact: ContactInfo {
            phone: Some("(555) TECH-GEAR".into()),
            email: Some("support@techgear.com".into()),
            website: Some("www.techgear.com".into()),
            address: Some("789 Tech Street, Innovation District".into()),
        },
        responses: vec![
            ResponseRule::new(
                "hello|hi|hey|good morning|good afternoon|good evening",
                "Hello! Welcome to TechGear Online Store. I'm here to help you find the \
                 perfect tech products and assist with your shopping needs. How can I \
                 help you today?",
            ),
            ResponseRule::new(
                "how are you|how's it going|how are things",
                "I'm doing great, thank you for asking! I'm here to help you find the \
                 best tech products. What brings you to TechGear today?",
            ),
            ResponseRule::new(
                "thanks|thank you|appreciate it|thank you so much",
                "You're very welcome! I'm here to help. Is there anything else you'd \
                 like to know about our products or services?",
            ),
            ResponseRule::new(
                "sales analytics|analytics|data|performance|metrics|revenue|statistics",
                "TechGear Sales Analytics:\n\n- Monthly revenue: $2.4M (+15% vs last \
                 month)\n- Top category: Laptops (35% of sales)\n- Customer \
                 satisfaction: 4.8/5 stars\n- Average order value: $247\n- Return rate: \
                 2.1% (industry average: 8%)\n\nOur data shows customers love our tech \
                 bundles and extended warranties!",
            ),
            ResponseRule::new(
                "deals|today deals|current deals|promotions|discounts|sales",
                "Today's Hot Deals at TechGear:\n\n- Gaming laptops: up to 30% off, \
                 starting at $799\n- Wireless headphones: 25% off all premium brands\n- \
                 Smart home bundle: save $150 on Alexa + smart bulbs\n- Student \
                 discount: 15% off with valid student ID\n\nWant personalized \
                 recommendations? Tell me what you're looking for!",
            ),
            ResponseRule::new(
                "best sellers|top products|popular items|trending",
                "TechGear Best Sellers:\n\n- MacBook Air M2: our #1 laptop - $1,199\n- \
                 Sony WH-1000XM5: premium noise-canceling headphones - $349\n- iPad \
                 Air: perfect for work & play - $599\n- Samsung Galaxy S23: flagship \
                 smartphone - $799\n- Apple Watch Series 9: health & fitness companion \
                 - $399\n\nThese are updated daily based on customer purchases and reviews!",
            ),
            ResponseRule::new(
                "shipping|delivery",
                "Shipping is free on orders over $50. Standard shipping is $5.99.",
            ),
            ResponseRule::new(
                "track order|order tracking|order status",
                "Please provide your order number so I can check the status for you.",
            ),
        ],
        fallback_response: Some(
            "I don't have specific information about that product, but our support team \
             can help!\n\nCall us: {phone}\nEmail: {email}\nVisit: {website}\n\nOur \
             customer service team is available to answer all your questions.\n\nI can \
             help with product recommendations, order status, or general support though!"
                .into(),
        ),
        ai_features: AiFeatures {
            lead_scoring: true,
            case_assessment: false,
            dynamic_responses: true,
            intent_detection: true,
            followup_generation: false,
        },
        lead_capture: LeadCapture {
            enabled: true,
            required_fields: vec!["name".into(), "email".into(), "product_interest".into()],
            optional_fields: vec![
                "budget_range".into(),
                "use_case".into(),
                "experience_level".into(),
                "preferred_brand".into(),
            ],
            case_types: Vec::new(),
            product_categories: vec![
                "Laptops & Computers".into(),
                "Smartphones & Tablets".into(),
                "Audio & Headphones".into(),
                "Gaming & Accessories".into(),
                "Smart Home Devices".into(),
                "Wearables & Fitness".into(),
            ],
            budget_ranges: vec![
                "$50 - $100".into(),
                "$100 - $250".into(),
                "$250 - $500".into(),
                "$500 - $1000".into(),
                "$1000+".into(),
            ],
        },
        lead_routing: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("acme-co");
        assert_eq!(config.client_id, "default");
        assert_eq!(config.industry, Industry::General);
        // Deterministic: same unknown id, same default.
        assert_eq!(registry.get("acme-co").client_id, registry.get("other").client_id);
    }

    #[test]
    fn test_known_tenants_resolve() {
        let registry = ClientRegistry::builtin();
        assert_eq!(registry.get("real-estate-demo").industry, Industry::RealEstate);
        assert_eq!(registry.get("law-firm-demo").industry, Industry::Legal);
        assert_eq!(registry.get("ecommerce-demo").industry, Industry::Ecommerce);
    }

    #[test]
    fn test_ids_are_sorted() {
        let registry = ClientRegistry::builtin();
        assert_eq!(
            registry.ids(),
            vec!["ecommerce-demo", "law-firm-demo", "real-estate-demo"]
        );
    }

    #[test]
    fn test_default_fallback_renders_contact() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("nope");
        let fallback = config.rendered_fallback();
        assert!(fallback.contains("(555) 123-4567"));
        assert!(!fallback.contains("{phone}"));
    }

    #[test]
    fn test_injury_rule_declared_before_greeting() {
        let registry = ClientRegistry::builtin();
        let legal = registry.get("law-firm-demo");
        let response = legal
            .matched_response("A drunk driver hit me from behind, I have neck pain")
            .expect("injury rule should match");
        assert!(response.contains("Personal Injury Case Assessment"));
    }

    #[test]
    fn test_redacted_view_hides_rules() {
        let registry = ClientRegistry::builtin();
        let redacted = registry.get("law-firm-demo").redacted();
        assert!(redacted.has_lead_capture);
        assert!(redacted.available_features.contains(&"lead_scoring".to_string()));
        let json = serde_json::to_string(&redacted).unwrap();
        assert!(!json.contains("Personal Injury Case Assessment"));
    }
}
