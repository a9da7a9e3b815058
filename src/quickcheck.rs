use compare::Compare;
use ::quickcheck::{Arbitrary, Gen};
use crate::map::TreeMap;

impl<K, V, C> Arbitrary for TreeMap<K, V, C>
    where K: Arbitrary, V: Arbitrary, C: 'static + Clone + Compare<K> + Default + Send {

    fn arbitrary(gen: &mut Gen) -> Self {
        let map = TreeMap::default();

        // keys the comparator cannot order are skipped
        for (key, value) in Vec::<(K, V)>::arbitrary(gen) { map.put(key, value).ok(); }
        map
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<(K, V)> = self.clone().into_iter().collect();

        Box::new(vec.shrink().map(|vec| {
            let map = TreeMap::default();
            for (key, value) in vec { map.put(key, value).ok(); }
            map
        }))
    }
}
