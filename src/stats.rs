use fnv::FnvHashMap;

use crate::types::TrainSet;

/// Maps string identifiers to consecutive integer ids and back.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct EntityDictionary {
    ids: FnvHashMap<String, u32>,
    names: Vec<String>,
}

impl EntityDictionary {

    pub fn new() -> Self {
        EntityDictionary::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the id for `name`, assigning the next free one on first sight.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(index) = self.ids.get(name) {
            return *index;
        }

        let index = self.names.len() as u32;
        self.ids.insert(name.to_owned(), index);
        self.names.push(name.to_owned());

        index
    }

    pub fn index(&self, name: &str) -> Option<u32> {
        self.ids.get(name).cloned()
    }

    pub fn name(&self, index: u32) -> &str {
        &self.names[index as usize]
    }
}

impl EntityDictionary {

    /// Dictionary over all actors of the training set.
    pub fn of_actors(train: &TrainSet) -> Self {
        let mut dictionary = EntityDictionary::new();
        for actor in train.keys() {
            dictionary.intern(actor);
        }
        dictionary
    }

    /// Dictionary over all entities any actor interacted with.
    pub fn of_entities(train: &TrainSet) -> Self {
        let mut dictionary = EntityDictionary::new();
        for entity in train.values().flat_map(|entities| entities.iter()) {
            dictionary.intern(entity);
        }
        dictionary
    }
}

/// Raw number of occurrences of each entity across all training histories.
pub fn entity_popularity(train: &TrainSet) -> FnvHashMap<&str, u32> {
    let mut popularity: FnvHashMap<&str, u32> =
        FnvHashMap::with_capacity_and_hasher(train.len(), Default::default());

    for entities in train.values() {
        for entity in entities.iter() {
            *popularity.entry(entity.as_str()).or_insert(0) += 1;
        }
    }

    popularity
}

/// Total number of interactions stored in a set of histories.
pub fn num_interactions(histories: &TrainSet) -> usize {
    histories.values().map(|entities| entities.len()).sum()
}
