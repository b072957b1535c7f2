//! Product grid projection

use super::gradient_css;
use crate::catalog::Catalog;
use crate::escape_html;
use crate::settings::ShopConfig;

/// Fixed placement slots for floating card icons (cycled when there are more icons)
const ICON_POSITIONS: [&str; 5] = [
    "top: 20%; left: 25%",
    "top: 15%; right: 20%",
    "bottom: 25%; left: 18%",
    "bottom: 20%; right: 22%",
    "top: 50%; left: 50%; transform: translate(-50%, -50%)",
];
const ICON_SIZES: [&str; 5] = ["2.2rem", "1.8rem", "1.6rem", "2rem", "1.5rem"];
const ICON_DELAY_STEP: f32 = 0.3;

/// Where and how one floating icon sits on the card visual
#[derive(Debug, Clone, PartialEq)]
pub struct IconPlacement {
    pub glyph: String,
    pub position: &'static str,
    pub size: &'static str,
    /// Float animation delay (seconds)
    pub delay: f32,
}

impl IconPlacement {
    pub fn for_index(glyph: &str, i: usize) -> Self {
        Self {
            glyph: glyph.to_string(),
            position: ICON_POSITIONS[i % ICON_POSITIONS.len()],
            size: ICON_SIZES[i % ICON_SIZES.len()],
            delay: i as f32 * ICON_DELAY_STEP,
        }
    }

    fn to_html(&self) -> String {
        format!(
            r#"<span class="product-visual-icon" style="position: absolute; {}; font-size: {}; animation-delay: {:.1}s;">{}</span>"#,
            self.position,
            self.size,
            self.delay,
            escape_html(&self.glyph)
        )
    }
}

/// One product card
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    /// Product id bound to the add-to-cart button
    pub id: u32,
    pub name: String,
    pub emoji: String,
    pub gradient: [String; 2],
    pub icons: Vec<IconPlacement>,
    pub tag: String,
    pub description: String,
    pub price_label: String,
    pub button_label: String,
}

impl ProductCardView {
    pub fn to_html(&self) -> String {
        let emoji = escape_html(&self.emoji);
        let icons: String = self.icons.iter().map(IconPlacement::to_html).collect();
        format!(
            r#"<div class="product-card">
  <div class="product-visual" style="background: {gradient}">
    <span class="product-visual-main">{emoji}</span>
    {icons}
    <span class="product-tag">{tag}</span>
  </div>
  <div class="product-info">
    <h2>{emoji} {name}</h2>
    <p class="description">{description}</p>
    <div class="product-meta">
      <span class="price">{price}</span>
    </div>
    <button class="add-to-cart" data-id="{id}">{label}</button>
  </div>
</div>"#,
            gradient = gradient_css(&self.gradient),
            emoji = emoji,
            icons = icons,
            tag = escape_html(&self.tag),
            name = escape_html(&self.name),
            description = escape_html(&self.description),
            price = escape_html(&self.price_label),
            id = self.id,
            label = escape_html(&self.button_label),
        )
    }
}

/// Project the catalog into cards, in catalog order
pub fn render_catalog(catalog: &Catalog, config: &ShopConfig) -> Vec<ProductCardView> {
    catalog
        .products()
        .iter()
        .map(|p| ProductCardView {
            id: p.id,
            name: p.name.clone(),
            emoji: p.emoji.clone(),
            gradient: p.gradient.clone(),
            icons: p
                .icons
                .iter()
                .enumerate()
                .map(|(i, g)| IconPlacement::for_index(g, i))
                .collect(),
            tag: p.tag.clone(),
            description: p.description.clone(),
            price_label: config.format_price(p.price as u64),
            button_label: config.add_to_cart_label.clone(),
        })
        .collect()
}

/// Markup for the whole product grid
pub fn catalog_html(catalog: &Catalog, config: &ShopConfig) -> String {
    render_catalog(catalog, config)
        .iter()
        .map(ProductCardView::to_html)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog;

    #[test]
    fn test_cards_in_catalog_order() {
        let cards = render_catalog(&catalog(), &ShopConfig::default());
        let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cards[1].price_label, "120 kr");
        assert_eq!(cards[0].button_label, "🛒 Legg i handlekurv");
    }

    #[test]
    fn test_icon_slots_cycle() {
        let first = IconPlacement::for_index("✨", 0);
        assert_eq!(first.position, "top: 20%; left: 25%");
        assert_eq!(first.size, "2.2rem");
        assert_eq!(first.delay, 0.0);

        let sixth = IconPlacement::for_index("⭐", 5);
        assert_eq!(sixth.position, first.position);
        assert_eq!(sixth.size, first.size);
        assert!((sixth.delay - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_catalog_html() {
        let html = catalog_html(&catalog(), &ShopConfig::default());
        assert_eq!(html.matches(r#"class="product-card""#).count(), 3);
        assert!(html.contains(r#"<button class="add-to-cart" data-id="2">"#));
        assert!(html.contains("linear-gradient(135deg, #ff85a1, #8338ec)"));
        assert_eq!(html.matches("product-visual-icon").count(), 6);
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(catalog_html(&Catalog::default(), &ShopConfig::default()), "");
    }
}
