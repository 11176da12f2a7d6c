// src/content/branding.rs

/// Decorative site content embedded in every rendered post. Injected into the
/// builder so the template logic stays free of agency-specific boilerplate.
#[derive(Debug, Clone)]
pub struct Branding {
    pub bed_icon: String,
    pub bath_icon: String,
    pub car_icon: String,
    pub agents: Vec<AgentCard>,
    pub social_icons: Vec<String>,
    /// CMS shortcode rendering the enquiry form button.
    pub enquiry_shortcode: String,
}

#[derive(Debug, Clone)]
pub struct AgentCard {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub photo_url: String,
}

impl Default for Branding {
    fn default() -> Self {
        let uploads = "https://realaliance.crystaldhub.com.au/wp-content/uploads/2024/06";
        Self {
            bed_icon: format!("{uploads}/1021592-200.png"),
            bath_icon: format!("{uploads}/bathroom.png"),
            car_icon: format!("{uploads}/car.png"),
            agents: vec![
                AgentCard {
                    name: "Nandana Peiris".to_string(),
                    title: "Property Expert".to_string(),
                    phone: "0452611234".to_string(),
                    photo_url: format!("{uploads}/nandanan.png"),
                },
                AgentCard {
                    name: "Chanaka Perera".to_string(),
                    title: "Property Expert".to_string(),
                    phone: "0422621234".to_string(),
                    photo_url: format!("{uploads}/Chanaka-Perera.jpg"),
                },
            ],
            social_icons: vec![
                format!("{uploads}/pngwing.com1_.png"),
                format!("{uploads}/pngwing.com_.png"),
                format!("{uploads}/twitter-icon.png"),
                format!("{uploads}/linkedin-icon.png"),
                format!("{uploads}/instagram-icon.png"),
            ],
            enquiry_shortcode: "[wpb-pcf-button]".to_string(),
        }
    }
}
