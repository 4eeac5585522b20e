//! Static route tables for the game-data proxy.
//!
//! Each entry is an upstream resource path; the HTTP layer mounts it under
//! `/gw2/<path>` with the handler shape its table implies.

use crate::domain::gw2::models::IdKind;

/// A collection resource accepting an optional `ids` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub path: &'static str,
    pub ids: IdKind,
}

const fn numeric(path: &'static str) -> Collection {
    Collection {
        path,
        ids: IdKind::Numeric,
    }
}

pub const COLLECTIONS: &[Collection] = &[
    numeric("items"),
    numeric("achievements"),
    numeric("achievements/groups"),
    numeric("achievements/categories"),
    numeric("maps"),
    numeric("continents"),
    numeric("skills"),
    numeric("traits"),
    numeric("specializations"),
    numeric("pets"),
    numeric("mounts/skins"),
    numeric("outfits"),
    numeric("skins"),
    numeric("minis"),
    numeric("titles"),
    numeric("colors"),
    numeric("currencies"),
    numeric("materials"),
    numeric("recipes"),
    numeric("dungeons"),
    numeric("raids"),
    numeric("guild/upgrades"),
    numeric("wvw/objectives"),
    numeric("wvw/ranks"),
    numeric("wvw/abilities"),
    numeric("wvw/upgrades"),
    numeric("commerce/listings"),
    numeric("commerce/prices"),
    Collection {
        path: "guild/permissions",
        ids: IdKind::Text,
    },
];

/// Resources forwarded as-is, without parameters.
pub const PLAIN: &[&str] = &[
    "build",
    "worlds",
    "achievements/daily",
    "achievements/daily/tomorrow",
    "races",
    "professions",
    "legends",
    "mounts/types",
];

/// Resources addressable as `<path>/<numeric id>`.
pub const BY_ID: &[&str] = &[
    "worlds",
    "items",
    "achievements",
    "maps",
    "continents",
    "skills",
    "traits",
    "specializations",
    "pets",
    "outfits",
    "skins",
    "minis",
    "titles",
    "colors",
    "currencies",
    "materials",
    "recipes",
    "dungeons",
    "raids",
];

/// Account-scoped resources that require the caller's `api_key`.
pub const KEYED: &[&str] = &[
    "account",
    "account/achievements",
    "account/bank",
    "account/wallet",
    "account/materials",
    "account/dungeons",
    "account/dailycrafting",
    "account/mapchests",
    "account/worldbosses",
    "characters",
    "tokeninfo",
    "commerce/transactions",
    "commerce/delivery",
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_tables_have_no_duplicates() {
        let collections: HashSet<_> = COLLECTIONS.iter().map(|c| c.path).collect();
        assert_eq!(collections.len(), COLLECTIONS.len());

        for table in [PLAIN, BY_ID, KEYED] {
            let unique: HashSet<_> = table.iter().collect();
            assert_eq!(unique.len(), table.len());
        }
    }

    #[test]
    fn test_collection_and_plain_paths_do_not_collide() {
        for collection in COLLECTIONS {
            assert!(!PLAIN.contains(&collection.path), "{}", collection.path);
            assert!(!KEYED.contains(&collection.path), "{}", collection.path);
        }
    }

    #[test]
    fn test_only_guild_permissions_take_text_ids() {
        let text: Vec<_> = COLLECTIONS
            .iter()
            .filter(|c| c.ids == IdKind::Text)
            .map(|c| c.path)
            .collect();

        assert_eq!(text, ["guild/permissions"]);
    }

    #[test]
    fn test_paths_are_relative() {
        let all = COLLECTIONS
            .iter()
            .map(|c| c.path)
            .chain(PLAIN.iter().copied())
            .chain(BY_ID.iter().copied())
            .chain(KEYED.iter().copied());

        for path in all {
            assert!(!path.starts_with('/') && !path.ends_with('/'), "{path}");
        }
    }
}
